pub use crate::{
    buf::{Buf20, Buf32},
    hash,
    params::ProtocolParams,
};
