//! Transaction assembly: message, fee and sign doc construction plus the
//! canonical byte encoding the signature covers.

pub mod builder;
pub mod canonical;

pub use builder::{
    build_fee, build_send_message, build_sign_doc, compute_send_amount, finalize, parse_amount,
    parse_uint53,
};
pub use canonical::{canonicalize, sign_bytes, sort_json};
