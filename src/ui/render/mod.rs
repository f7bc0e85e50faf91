mod all;
mod footer;
mod form;
mod header;
mod log;
mod saved;

use self::log::log;
use super::*;
use footer::footer;
use form::form;
use header::header;
use saved::saved;

pub use all::all as render;
