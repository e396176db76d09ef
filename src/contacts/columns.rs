//! Header discovery for contact CSV files.
//!
//! Column order is not fixed; every import resolves the five required header
//! names to positions before any row is read.

/// A column the contact importer requires in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactColumn {
    EmailAddress,
    FullName,
    Timestamp,
    TwitterProfile,
    LinkedInProfile,
}

impl ContactColumn {
    pub const ALL: [ContactColumn; 5] = [
        ContactColumn::EmailAddress,
        ContactColumn::FullName,
        ContactColumn::Timestamp,
        ContactColumn::TwitterProfile,
        ContactColumn::LinkedInProfile,
    ];

    /// Exact, case-sensitive header text.
    pub fn header(self) -> &'static str {
        match self {
            ContactColumn::EmailAddress => "Email Address",
            ContactColumn::FullName => "Full Name",
            ContactColumn::Timestamp => "Timestamp",
            ContactColumn::TwitterProfile => "Twitter Profile",
            ContactColumn::LinkedInProfile => "LinkedIn Profile",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }

    fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.header() == header)
    }
}

/// Field values of one data row, borrowed from the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFields<'r> {
    pub email: &'r str,
    pub full_name: &'r str,
    pub timestamp: &'r str,
    pub twitter_profile: &'r str,
    pub linkedin_profile: &'r str,
}

/// Resolved position of every required column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 5],
}

impl ColumnMap {
    /// Resolve the required columns against a header row.
    ///
    /// On failure returns the header names that were not found, in
    /// [`ContactColumn::ALL`] order. When a name occurs more than once the
    /// last occurrence wins.
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Result<Self, Vec<&'static str>> {
        let mut found: [Option<usize>; 5] = [None; 5];

        for (index, name) in header.iter().enumerate() {
            if let Some(column) = ContactColumn::from_header(name.as_ref()) {
                found[column.slot()] = Some(index);
            }
        }

        let missing: Vec<&'static str> = ContactColumn::ALL
            .into_iter()
            .filter(|column| found[column.slot()].is_none())
            .map(ContactColumn::header)
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let mut indices = [0usize; 5];
        for column in ContactColumn::ALL {
            if let Some(index) = found[column.slot()] {
                indices[column.slot()] = index;
            }
        }
        Ok(Self { indices })
    }

    pub fn index_of(&self, column: ContactColumn) -> usize {
        self.indices[column.slot()]
    }

    /// Smallest row length able to supply every required column.
    pub fn min_row_len(&self) -> usize {
        self.indices.iter().copied().max().unwrap_or(0) + 1
    }

    /// Pull the five fields out of a data row, or `None` when the row is too
    /// short to contain them.
    pub fn extract<'r, S: AsRef<str>>(&self, row: &'r [S]) -> Option<ContactFields<'r>> {
        if row.len() < self.min_row_len() {
            return None;
        }
        Some(ContactFields {
            email: self.field(row, ContactColumn::EmailAddress),
            full_name: self.field(row, ContactColumn::FullName),
            timestamp: self.field(row, ContactColumn::Timestamp),
            twitter_profile: self.field(row, ContactColumn::TwitterProfile),
            linkedin_profile: self.field(row, ContactColumn::LinkedInProfile),
        })
    }

    fn field<'r, S: AsRef<str>>(&self, row: &'r [S], column: ContactColumn) -> &'r str {
        row[self.index_of(column)].as_ref()
    }
}
