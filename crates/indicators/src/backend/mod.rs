//! Backend strategies for evaluating the rolling windows.

pub mod columnar;
pub mod eager;

use bband_types::Backend;

use crate::traits::BandBackend;
pub use columnar::ColumnarBackend;
pub use eager::EagerBackend;

static EAGER: EagerBackend = EagerBackend;
static COLUMNAR: ColumnarBackend = ColumnarBackend;

/// Strategy implementing `backend`.
#[must_use]
pub fn backend_for(backend: Backend) -> &'static dyn BandBackend {
    match backend {
        Backend::Eager => &EAGER,
        Backend::Columnar => &COLUMNAR,
    }
}
