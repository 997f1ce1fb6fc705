//! Bulk faculty transfer requests.

use std::str::FromStr;

use thiserror::Error;

use crate::ids::StudentId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdListError {
    #[error("Invalid student id '{0}'")]
    InvalidId(String),
}

/// Comma separated student ids from a path segment, e.g. `1,2,3`.
///
/// Duplicates are dropped while keeping first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentIdList(Vec<StudentId>);

impl StudentIdList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw keys for binding as a `BIGINT[]`.
    pub fn as_i64s(&self) -> Vec<i64> {
        self.0.iter().map(|id| id.into_inner()).collect()
    }
}

impl FromStr for StudentIdList {
    type Err = IdListError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut ids: Vec<StudentId> = Vec::new();

        for part in raw.split(',') {
            let part = part.trim();
            let id: StudentId = part
                .parse()
                .map_err(|_| IdListError::InvalidId(part.to_string()))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(Self(ids))
    }
}
