//! Push-payload decoding for the approve-and-call entry point.
//!
//! Payloads are fixed-width and validated by length before any funds move.
//! Collateral-path payload: empty (activate = false) or a single activate
//! byte. External-path payload: activate byte, min_native_out (i128 BE),
//! min_collateral_out (i128 BE), deadline (u64 BE).

use soroban_sdk::Bytes;

use crate::error::RouterError;

pub const EXTERNAL_PAYLOAD_LEN: u32 = 41;

pub struct ExternalParams {
    pub activate: bool,
    pub min_native_out: i128,
    pub min_collateral_out: i128,
    pub deadline: u64,
}

pub fn decode_collateral_payload(payload: &Bytes) -> Result<bool, RouterError> {
    match payload.len() {
        0 => Ok(false),
        1 => Ok(payload.get_unchecked(0) != 0),
        _ => Err(RouterError::WrongDataLength),
    }
}

pub fn decode_external_payload(payload: &Bytes) -> Result<ExternalParams, RouterError> {
    if payload.len() != EXTERNAL_PAYLOAD_LEN {
        return Err(RouterError::WrongDataLength);
    }

    let mut buf = [0u8; EXTERNAL_PAYLOAD_LEN as usize];
    payload.copy_into_slice(&mut buf);

    let mut min_native = [0u8; 16];
    min_native.copy_from_slice(&buf[1..17]);
    let mut min_collateral = [0u8; 16];
    min_collateral.copy_from_slice(&buf[17..33]);
    let mut deadline = [0u8; 8];
    deadline.copy_from_slice(&buf[33..41]);

    Ok(ExternalParams {
        activate: buf[0] != 0,
        min_native_out: i128::from_be_bytes(min_native),
        min_collateral_out: i128::from_be_bytes(min_collateral),
        deadline: u64::from_be_bytes(deadline),
    })
}
