//! A student record and the comparator used to order student-keyed maps
//!
//! Used to exercise the comparator-supplied construction mode of `tree_map`

use std::fmt;
use std::cmp::Ordering;

use chrono::NaiveDate;
use compare::Compare;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    name: String,
    date_of_birth: NaiveDate,
    id: String,
}

impl Student {
    pub fn new(name: impl Into<String>, date_of_birth: NaiveDate, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student({}, {}, #{})", self.name, self.date_of_birth, self.id)
    }
}

/// Orders students by name, and students sharing a name from youngest to oldest
///
/// The `id` field does not participate, so two records that differ only by id compare equal and
/// occupy the same slot in a map ordered by this comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentComparator;

impl Compare<Student> for StudentComparator {
    fn compare(&self, l: &Student, r: &Student) -> Ordering {
        l.name.cmp(&r.name)
            .then_with(|| r.date_of_birth.cmp(&l.date_of_birth))
    }
}
