//! Helpers for building synthetic MPT files in tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use mptdump::MPT_MAGIC;

pub const KIND_INTEGER: u64 = 1;
pub const KIND_FIXED_POINT: u64 = 2;

const DISK_HEADER_SIZE: usize = 4096;

/// Write a well-formed fixed-point MPT file holding `limbs` with the given
/// exponent.
pub fn write_mpt_file(path: &Path, limbs: &[u64], exponent: i64) {
    write_mpt_file_raw(path, MPT_MAGIC, KIND_FIXED_POINT, limbs.len() as u64, limbs, exponent);
}

/// Write an MPT file with full control over the header fields, so tests can
/// produce corrupt or inconsistent files.
pub fn write_mpt_file_raw(
    path: &Path,
    magic: [u8; 8],
    kind: u64,
    stored_len: u64,
    limbs: &[u64],
    exponent: i64,
) {
    let mut out = Vec::with_capacity(DISK_HEADER_SIZE + limbs.len() * 8);
    out.extend_from_slice(&magic);
    out.extend_from_slice(&stored_len.to_le_bytes());
    out.extend_from_slice(&stored_len.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&0u64.to_le_bytes());
    out.extend_from_slice(&0u64.to_le_bytes());
    out.extend_from_slice(&exponent.to_le_bytes());
    out.resize(DISK_HEADER_SIZE, 0);
    for limb in limbs {
        out.extend_from_slice(&limb.to_le_bytes());
    }
    fs::write(path, out).unwrap();
}

/// Pull up to `count` digit values from a fresh reader.
pub fn collect_digits(reader: &mut mptdump::MptReader, count: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..count {
        match reader.next_digit().unwrap() {
            Some(d) => out.push(d),
            None => break,
        }
    }
    out
}
