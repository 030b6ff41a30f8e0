//! Rom ingestion, the raw byte convention is the format.
use crate::{definitions::memory, RomError};

/// Represents a single rom with it's information
#[derive(Clone)]
pub struct Rom {
    /// The rom name, kept for diagnostics
    name: String,
    /// The raw program bytes, copied verbatim to `0x200` on load
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data.
    ///
    /// The bytes have to fit into the program area of ram, everything up
    /// to `0x200` is reserved for the interpreter.
    pub fn new(name: &str, data: &[u8]) -> Result<Self, RomError> {
        if data.len() > memory::MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                size: data.len(),
                max: memory::MAX_ROM_SIZE,
            });
        }

        Ok(Rom {
            name: name.to_string(),
            data: data.into(),
        })
    }

    /// Will return a slice of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_fits() {
        let data = vec![0xAA; memory::MAX_ROM_SIZE];
        let rom = Rom::new("full", &data).unwrap();
        assert_eq!(rom.get_name(), "full");
        assert_eq!(rom.get_data(), &data[..]);
    }

    #[test]
    fn test_rom_too_large() {
        let data = vec![0xAA; memory::MAX_ROM_SIZE + 1];
        assert_eq!(
            Err(RomError::TooLarge {
                size: memory::MAX_ROM_SIZE + 1,
                max: memory::MAX_ROM_SIZE,
            }),
            Rom::new("oversized", &data).map(|_| ())
        );
    }
}
