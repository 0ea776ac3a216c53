// Domain layer: listing records and the fetcher port. No I/O lives here.

pub mod model;
pub mod ports;
