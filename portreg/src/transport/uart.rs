//! Vendor UART lines (IOIO board).

use super::{Discovered, Family, TransportEnumerator};
use crate::error::Result;
use crate::kind::PortKind;

/// UART lines reported by the board: a count plus per-line help.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UartLines {
    count: u32,
    help: Vec<String>,
}

impl UartLines {
    /// `count` lines without help text.
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self {
            count,
            help: Vec::new(),
        }
    }

    /// Attach help text; line `i` gets `help[i]`.
    #[must_use]
    pub fn with_help(mut self, help: Vec<String>) -> Self {
        self.help = help;
        self
    }

    /// Display label of line `index`.
    #[must_use]
    pub fn label(index: u32) -> String {
        format!("IOIO UART {index}")
    }
}

impl TransportEnumerator for UartLines {
    fn family(&self) -> Family {
        Family::Uart
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        Ok((0..self.count)
            .map(|i| {
                let line =
                    Discovered::new(PortKind::IoioUart, i.to_string()).with_label(Self::label(i));
                match usize::try_from(i).ok().and_then(|i| self.help.get(i)) {
                    Some(help) => line.with_help(help.clone()),
                    None => line,
                }
            })
            .collect())
    }
}
