//! [`FormPage`](crate::FormPage) and [`FormScope`](crate::FormScope) over CDP.

mod frame;
mod page;
mod scripts;

pub use frame::FrameScope;
pub use page::CdpFormPage;
