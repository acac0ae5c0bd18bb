#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::{Context, Result};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Register memory of a simulated device, addressed like the real thing.
pub struct DeviceSim {
    registers: HashMap<u16, Vec<u8>>,
    writes: usize,
}

impl DeviceSim {
    pub fn new(registers: &[(u16, &[u8])]) -> DeviceSim {
        DeviceSim {
            registers: registers
                .iter()
                .map(|(addr, bytes)| (*addr, bytes.to_vec()))
                .collect(),
            writes: 0,
        }
    }

    pub fn read(&self, addr: u16) -> Result<&[u8]> {
        self.registers
            .get(&addr)
            .map(Vec::as_slice)
            .with_context(|| format!("no register at {:#06x}", addr))
    }

    pub fn write(&mut self, addr: u16, bytes: &[u8]) -> Result<()> {
        let register = self
            .registers
            .get_mut(&addr)
            .with_context(|| format!("no register at {:#06x}", addr))?;
        register.clear();
        register.extend_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}
