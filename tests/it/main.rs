mod array;
mod bitmap;
mod buffer;
mod datatypes;
mod record_batch;

mod io;
