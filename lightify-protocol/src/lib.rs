//! Wire codec for the Lightify gateway's binary protocol
//!
//! This crate knows the byte layout of every request and answer the driver
//! exchanges with the gateway: telegram framing, per-opcode bodies, status
//! mapping and the record-size based protocol-version detection. It is pure
//! encoding/decoding; no I/O happens here.

pub mod answer;
pub mod opcode;
pub mod request;
pub mod status;
pub mod telegram;
pub mod version;

pub use answer::{
    GROUP_RECORD_LENGTH, GROUP_SCAN_PREFIX_LENGTH, GroupScanPrefix, NODE_SCAN_PREFIX_LENGTH,
    NodeScanPrefix, SET_ANSWER_LENGTH, SetAnswer, UPDATE_BODY_LENGTH, UpdateBody,
    decode_group_record, decode_node_record,
};
pub use opcode::Opcode;
pub use request::Target;
pub use status::{STATUS_NOT_PRESENT, STATUS_OK, decode_status};
pub use telegram::{
    FLAG_GROUP, FLAG_UNICAST, TELEGRAM_HEADER_LENGTH, TelegramHeader,
};
pub use version::{
    NODE_RECORD_LENGTH_2015, NODE_RECORD_LENGTH_LEGACY, ProtocolVersion, SCAN_LENGTH_OVERHEAD,
};
