mod formatting;

pub(crate) use formatting::*;
