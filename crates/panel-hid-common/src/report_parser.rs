//! HID report cursors
//!
//! [`ReportParser`] borrows the transport's read buffer instead of copying it,
//! so decoding an input report never allocates. [`ReportBuilder`] assembles
//! output reports front to back.

use crate::{HidCommonError, HidCommonResult};

fn end_of_data(wanted: usize, position: usize, len: usize) -> HidCommonError {
    HidCommonError::InvalidReport(format!(
        "need {wanted} byte(s) at offset {position}, report is {len} byte(s)"
    ))
}

pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            position: 0,
        }
    }

    /// Little-endian `u16` at an absolute offset, `None` past the end.
    pub fn u16_le_at(data: &[u8], offset: usize) -> Option<u16> {
        let lo = *data.get(offset)?;
        let hi = *data.get(offset.checked_add(1)?)?;
        Some(u16::from_le_bytes([lo, hi]))
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    fn take(&mut self, count: usize) -> HidCommonResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|end| *end <= self.buffer.len())
            .ok_or_else(|| end_of_data(count, self.position, self.buffer.len()))?;
        let bytes = self
            .buffer
            .get(self.position..end)
            .ok_or_else(|| end_of_data(count, self.position, self.buffer.len()))?;
        self.position = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> HidCommonResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> HidCommonResult<u8> {
        let [value] = self.take_array::<1>()?;
        Ok(value)
    }

    pub fn read_u16_le(&mut self) -> HidCommonResult<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u16_be(&mut self) -> HidCommonResult<u16> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    pub fn read_bytes(&mut self, count: usize) -> HidCommonResult<&'a [u8]> {
        self.take(count)
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.buffer
    }
}

pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_u16_be(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Zero-fills up to `len` bytes; longer buffers are left alone.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        if self.buffer.len() < len {
            self.buffer.resize(len, 0);
        }
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
