pub mod fee_math;
pub use fee_math::*;
pub mod safe_math;
pub use safe_math::*;
pub mod u128x128_math;
pub use u128x128_math::*;
pub mod utils_math;
pub use utils_math::*;
