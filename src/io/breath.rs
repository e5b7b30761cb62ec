// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyboard stand-in for a microphone.
//!
//! Holding the blow key produces full energy. The UI writes the level each
//! frame through a shared cell; the source only reads it while started.

use crate::models::blow::{EnergySource, MicError};
use std::cell::Cell;
use std::rc::Rc;

pub struct KeyboardBreath {
    level: Rc<Cell<f32>>,
    open: bool,
}

impl KeyboardBreath {
    /// Create a source reading from `level`.
    pub fn new(level: Rc<Cell<f32>>) -> Self {
        Self { level, open: false }
    }
}

impl EnergySource for KeyboardBreath {
    fn start(&mut self) -> Result<(), MicError> {
        self.open = true;
        Ok(())
    }

    fn stop(&mut self) {
        if self.open {
            log::debug!("Breath input released");
        }
        self.open = false;
    }

    fn level(&mut self) -> f32 {
        if self.open {
            self.level.get().clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_only_while_open() {
        let cell = Rc::new(Cell::new(1.0));
        let mut breath = KeyboardBreath::new(cell.clone());
        assert_eq!(breath.level(), 0.0);

        breath.start().unwrap();
        assert_eq!(breath.level(), 1.0);
        cell.set(3.0);
        assert_eq!(breath.level(), 1.0);

        breath.stop();
        assert_eq!(breath.level(), 0.0);
    }
}
