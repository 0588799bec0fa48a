//! Contract bindings, ABI loading, and receipt event decoding

mod contracts;
mod decoder;
mod loader;

pub use contracts::{
    Contract, DirectGrantsInitializeParams, DonationVotingInitializeData, IAllo, IRegistry,
    IStrategy, Metadata,
};
pub use decoder::{
    decode_all_typed, decode_event, decode_typed, format_value, value_to_json, DecodedEvent,
    LogSource,
};
pub use loader::load_from_file;
