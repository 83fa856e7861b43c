use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use crate::{
    error::{CqError, Result},
    types::Call,
};

/// Read the whole input, from `path` if given, stdin otherwise
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| CqError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            read_all(file)
        }
        None => read_all(io::stdin().lock()),
    }
}

/// Read the whole input and decode it as a call record
pub fn read_call(path: Option<&Path>) -> Result<Call> {
    let bytes = read_input(path)?;
    Call::from_slice(&bytes)
}

fn read_all(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(CqError::Read)?;
    log::debug!("read {} bytes of input", bytes.len());
    Ok(bytes)
}
