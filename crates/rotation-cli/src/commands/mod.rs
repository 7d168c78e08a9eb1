pub mod catalog;
pub mod config;
pub mod convert;
pub mod edit;

use std::io::Read;
use std::path::Path;

/// Read a whole file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
