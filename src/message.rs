//! Assembly of the 10-symbol LightwaveRF frame.
//!
//! [`MessageBuilder`] owns the single frame buffer. It can be filled three ways:
//! a raw 10-nibble message, a 5-nibble address that later commands reuse, or
//! structured command fields. Building never starts a transmission; that is the
//! [`Transmitter`](crate::driver::Transmitter)'s job.

use crate::consts::{
    ADDR_LEN, ADDR_OFFSET, COMMAND_INDEX, DEFAULT_FRAME, DEVICE_INDEX, MSG_LEN, PARAM_HIGH_INDEX,
    PARAM_LOW_INDEX, ROOM_INDEX,
};
use crate::encoding::{decode_symbol, encode_buffer, encode_nibble};
use crate::error::TxError;

/// One frame of line symbols, in transmit order.
pub type EncodedMessage = [u8; MSG_LEN];

/// Fields of a LightwaveRF command frame.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Command {
    /// Command nibble (on, off, mood, ...)
    pub command: u8,
    /// Full parameter byte, sent as two nibbles (dim level, mood number, ...)
    pub parameter: u8,
    /// Room nibble
    pub room: u8,
    /// Device nibble
    pub device: u8,
}

impl Command {
    /// Creates a command, in the argument order of the host interface.
    pub const fn new(command: u8, parameter: u8, room: u8, device: u8) -> Self {
        Self {
            command,
            parameter,
            room,
            device,
        }
    }
}

/// Builder and owner of the frame buffer.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    buf: EncodedMessage,
    translate: bool,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBuilder {
    /// Creates a builder holding [`DEFAULT_FRAME`] with translation enabled.
    pub const fn new() -> Self {
        Self {
            buf: DEFAULT_FRAME,
            translate: true,
        }
    }

    /// Enables or disables nibble translation for raw messages.
    ///
    /// With translation off, raw messages are copied verbatim and must already
    /// consist of line symbols.
    pub fn set_translate(&mut self, translate: bool) {
        self.translate = translate;
    }

    /// Whether raw messages are translated.
    pub fn translate(&self) -> bool {
        self.translate
    }

    /// The current frame.
    pub fn message(&self) -> &EncodedMessage {
        &self.buf
    }

    /// The encoded address symbols at positions 4–8.
    pub fn address(&self) -> [u8; ADDR_LEN] {
        let mut address = [0u8; ADDR_LEN];
        address.copy_from_slice(&self.buf[ADDR_OFFSET..ADDR_OFFSET + ADDR_LEN]);
        address
    }

    /// Loads a raw message into the frame.
    ///
    /// # Errors
    /// [`TxError::InvalidLength`] unless `raw` holds exactly [`MSG_LEN`] bytes. The
    /// frame is left untouched in that case.
    pub fn build_from_raw(&mut self, raw: &[u8]) -> Result<&EncodedMessage, TxError> {
        let raw: &[u8; MSG_LEN] = raw
            .try_into()
            .map_err(|_| TxError::invalid_length(raw.len()))?;
        if self.translate {
            let _ = encode_buffer(raw, &mut self.buf);
        } else {
            self.buf = *raw;
        }
        Ok(&self.buf)
    }

    /// Encodes a 5-nibble address into positions 4–8.
    ///
    /// # Returns
    /// The encoded address, for persisting.
    pub fn set_address(&mut self, address: &[u8; ADDR_LEN]) -> [u8; ADDR_LEN] {
        let _ = encode_buffer(address, &mut self.buf[ADDR_OFFSET..ADDR_OFFSET + ADDR_LEN]);
        self.address()
    }

    /// Loads an already encoded address, e.g. one read back from storage.
    ///
    /// Returns `false` and leaves the frame untouched if any byte is not a line symbol.
    pub fn restore_address(&mut self, encoded: &[u8; ADDR_LEN]) -> bool {
        if encoded.iter().any(|&s| decode_symbol(s).is_none()) {
            return false;
        }
        self.buf[ADDR_OFFSET..ADDR_OFFSET + ADDR_LEN].copy_from_slice(encoded);
        true
    }

    /// Fills parameter, device, command and room, keeping the current address.
    pub fn build_from_fields(&mut self, cmd: &Command) -> &EncodedMessage {
        self.buf[PARAM_HIGH_INDEX] = encode_nibble(cmd.parameter >> 4);
        self.buf[PARAM_LOW_INDEX] = encode_nibble(cmd.parameter);
        self.buf[DEVICE_INDEX] = encode_nibble(cmd.device);
        self.buf[COMMAND_INDEX] = encode_nibble(cmd.command);
        self.buf[ROOM_INDEX] = encode_nibble(cmd.room);
        &self.buf
    }
}
