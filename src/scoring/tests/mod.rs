mod common;

mod codec;
mod ledger;
