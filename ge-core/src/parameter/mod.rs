//! Structures and functions that can be used to read binary interaction
//! parameters of activity coefficient models.
use crate::errors::{GeError, GeResult};
use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;

mod identifier;
mod model_record;

pub use identifier::{Identifier, IdentifierOption};
pub use model_record::BinaryRecord;

/// Select the binary records that connect two of the queried substances.
///
/// Returns the model records together with the indices of `id1` and `id2`
/// in `substances`. Records that contain a substance which was not queried
/// are skipped.
pub fn select_binary_records<B>(
    substances: &[&str],
    binary_records: Vec<BinaryRecord<Identifier, B>>,
    identifier_option: IdentifierOption,
) -> GeResult<Vec<([usize; 2], B)>> {
    let queried: IndexSet<&str> = substances.iter().copied().collect();
    if queried.len() != substances.len() {
        return Err(GeError::IncompatibleParameters(
            "A substance was defined more than once.".to_string(),
        ));
    }

    let mut pairs = HashSet::new();
    let mut selected = Vec::new();
    for record in binary_records {
        let index = |id: &Identifier| {
            id.as_str(identifier_option)
                .and_then(|id| queried.get_index_of(id))
        };
        let (Some(i), Some(j)) = (index(&record.id1), index(&record.id2)) else {
            continue;
        };
        if i == j {
            return Err(GeError::IncompatibleParameters(format!(
                "Binary record for {} with itself.",
                substances[i]
            )));
        }
        if !pairs.insert([i.min(j), i.max(j)]) {
            return Err(GeError::IncompatibleParameters(format!(
                "Binary parameters for {} and {} were defined more than once.",
                substances[i], substances[j]
            )));
        }
        selected.push(([i, j], record.model_record));
    }
    Ok(selected)
}

/// Read binary records from a json file and select the ones that connect
/// two of the queried substances (see [select_binary_records]).
pub fn binary_records_from_json<B, P>(
    substances: &[&str],
    file: P,
    identifier_option: IdentifierOption,
) -> GeResult<Vec<([usize; 2], B)>>
where
    B: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = file.as_ref();
    let records = BinaryRecord::from_json(path)?;
    let available = records.len();
    let selected = select_binary_records(substances, records, identifier_option)?;
    tracing::debug!(
        file = %path.display(),
        available,
        selected = selected.len(),
        "read binary records"
    );
    Ok(selected)
}
