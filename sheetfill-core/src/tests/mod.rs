mod common;

pub(crate) use common::{mk_config, mk_page, mk_row, mk_weekend_row};
