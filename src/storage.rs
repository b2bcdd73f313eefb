//! Non-volatile storage for the encoded device address.
//!
//! The transmitter can persist the five encoded address symbols so that a
//! device keeps its LightwaveRF identity across power cycles. Storage is
//! optional: use [`NoStore`] when the target has nothing suitable, and
//! transmission works the same, only without restoring the address.

use crate::consts::ADDR_LEN;

/// Byte-addressable storage holding the encoded address at a base offset.
pub trait AddressStore {
    /// Error raised by the underlying storage.
    type Error: core::fmt::Debug;

    /// Reads [`ADDR_LEN`] bytes starting at `offset`.
    fn read_address(&mut self, offset: usize) -> Result<[u8; ADDR_LEN], Self::Error>;

    /// Writes [`ADDR_LEN`] bytes starting at `offset`.
    fn write_address(&mut self, offset: usize, address: &[u8; ADDR_LEN])
    -> Result<(), Self::Error>;
}

/// Storage that holds nothing.
///
/// Reads report [`NoStoreError`], so the built-in default address is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStore;

/// Returned by [`NoStore`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct NoStoreError;

impl AddressStore for NoStore {
    type Error = NoStoreError;

    fn read_address(&mut self, _offset: usize) -> Result<[u8; ADDR_LEN], Self::Error> {
        Err(NoStoreError)
    }

    fn write_address(
        &mut self,
        _offset: usize,
        _address: &[u8; ADDR_LEN],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: AddressStore> AddressStore for &mut S {
    type Error = S::Error;

    fn read_address(&mut self, offset: usize) -> Result<[u8; ADDR_LEN], Self::Error> {
        (**self).read_address(offset)
    }

    fn write_address(
        &mut self,
        offset: usize,
        address: &[u8; ADDR_LEN],
    ) -> Result<(), Self::Error> {
        (**self).write_address(offset, address)
    }
}
