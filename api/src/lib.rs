pub mod accrual;
pub mod consts;
pub mod cursor;
pub mod error;
pub mod layout;
pub mod numeric;
pub mod state;
pub mod valuation;

pub mod prelude {
    pub use crate::accrual::*;
    pub use crate::consts::*;
    pub use crate::cursor::*;
    pub use crate::error::*;
    pub use crate::layout::{Field, FieldKind, Layout};
    pub use crate::numeric::*;
    pub use crate::state::*;
    pub use crate::valuation::*;
}
