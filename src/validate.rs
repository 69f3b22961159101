//! Strict-mode validation: detect configuration keys no flag accepts.
//!
//! Every leaf path of the tree is flattened to its dash-joined key and checked
//! against the [`Schema`]. Keys at or below a raw flag's key are accepted
//! without further checks, since raw flags consume whole fragments.

use tracing::debug;

use crate::error::HclError;
use crate::flatten::{flatten, key_string};
use crate::schema::Schema;
use crate::tree::Table;

/// Validate that `table` contains no keys unknown to `schema`.
///
/// Keys are checked in document order and the first unknown one is reported.
pub fn validate(table: &Table, schema: &Schema) -> Result<(), HclError> {
    for path in flatten(table) {
        let key = key_string(&path);
        if !schema.accepts(&key) {
            debug!(key = %key, "configuration key matches no flag");
            return Err(HclError::UnknownKey(key));
        }
    }
    Ok(())
}
