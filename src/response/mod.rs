//! Response handling module - Base64 payloads and data URLs

pub mod base64;
