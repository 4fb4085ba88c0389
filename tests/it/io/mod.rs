#[cfg(feature = "io_ipc")]
mod ipc;
