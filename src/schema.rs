//! Column layouts of the tabular source.
//!
//! The spreadsheet behind the directory has changed shape several times:
//! columns moved, the `featured` flag switched from a boolean to a status
//! keyword, and list fields changed delimiter. A [`SchemaMap`] captures one
//! such layout as data, so moving to a new layout is a configuration change.
//!
//! Columns are addressed either by position or by header label. Header
//! labels are resolved against the first row of the source when the
//! schema is applied (see [`SchemaMap::resolve`]).

use std::collections::HashMap;

/// A Company field that can be fed from a source column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    EnergyTypes,
    Location,
    Country,
    Region,
    Founded,
    Logo,
    Featured,
    ContactEmail,
    ContactPhone,
    Linkedin,
    Twitter,
    Facebook,
    Instagram,
    Services,
    Products,
    Certifications,
    Tags,
}

/// Where a field's value lives in a source row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    /// Zero-based column position.
    Index(usize),
    /// Header label, matched trimmed and case-insensitively.
    Header(String),
}

impl From<usize> for Column {
    fn from(index: usize) -> Self {
        Column::Index(index)
    }
}

impl From<&str> for Column {
    fn from(label: &str) -> Self {
        Column::Header(label.to_string())
    }
}

impl From<String> for Column {
    fn from(label: String) -> Self {
        Column::Header(label)
    }
}

/// How the `featured` column encodes "yes".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeaturedEncoding {
    /// Exactly `TRUE`, `true` or `1`.
    Boolean,
    /// A status keyword such as `featured` or `published`, compared
    /// ASCII-case-insensitively.
    Status(String),
}

impl FeaturedEncoding {
    /// Decode one cell. Anything that is not the exact truthy form is `false`.
    pub fn decode(&self, raw: &str) -> bool {
        let value = raw.trim();
        match self {
            FeaturedEncoding::Boolean => matches!(value, "TRUE" | "true" | "1"),
            FeaturedEncoding::Status(keyword) => value.eq_ignore_ascii_case(keyword),
        }
    }
}

/// An injectable source layout.
///
/// # Example
///
/// ```
/// use energy_directory::{Field, SchemaMap};
///
/// // Name,Website,Type,Desc
/// let schema = SchemaMap::new()
///     .name(0)
///     .website(1)
///     .energy_types(2)
///     .description(3)
///     .column(Field::Tags, "Tags")
///     .min_columns(4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaMap {
    columns: Vec<(Field, Column)>,
    website: Vec<Column>,
    list_delimiter: char,
    featured_encoding: FeaturedEncoding,
    min_columns: usize,
    header_rows: usize,
}

impl SchemaMap {
    /// An empty layout: no columns, `,` lists, boolean `featured`, at least
    /// one column per row, one header row.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            website: Vec::new(),
            list_delimiter: ',',
            featured_encoding: FeaturedEncoding::Boolean,
            min_columns: 1,
            header_rows: 1,
        }
    }

    /// The published CSV export of the directory spreadsheet.
    ///
    /// `Region, Country, Company, Energy Types, Description, Website, _,
    /// Logo, _, Tags, Status`, with `;`-separated tags and a `featured`
    /// status keyword. The first column doubles as location and region.
    pub fn sheet_export() -> Self {
        Self::new()
            .location(0)
            .region(0)
            .country(1)
            .name(2)
            .energy_types(3)
            .description(4)
            .website(5)
            .logo(7)
            .tags(9)
            .featured(10)
            .list_delimiter(';')
            .featured_encoding(FeaturedEncoding::Status("featured".into()))
            .min_columns(4)
    }

    /// The header-labelled layout served by the spreadsheet API, with a
    /// boolean `Featured` column, `,`-separated lists and a `URL` column
    /// tried when `Website` is blank or unsafe.
    pub fn sheet_api() -> Self {
        Self::new()
            .name("Name")
            .website("Website")
            .website("URL")
            .description("Description")
            .energy_types("Energy Types")
            .location("Location")
            .country("Country")
            .region("Region")
            .column(Field::Founded, "Founded")
            .logo("Logo")
            .featured("Featured")
            .column(Field::ContactEmail, "Email")
            .column(Field::ContactPhone, "Phone")
            .column(Field::Linkedin, "LinkedIn")
            .column(Field::Twitter, "Twitter")
            .column(Field::Facebook, "Facebook")
            .column(Field::Instagram, "Instagram")
            .column(Field::Services, "Services")
            .column(Field::Products, "Products")
            .column(Field::Certifications, "Certifications")
            .tags("Tags")
            .min_columns(4)
    }

    /// Map `field` to `column`, replacing any previous mapping.
    pub fn column(mut self, field: Field, column: impl Into<Column>) -> Self {
        let column = column.into();
        match self.columns.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = column,
            None => self.columns.push((field, column)),
        }
        self
    }

    /// Column holding the company name.
    pub fn name(self, column: impl Into<Column>) -> Self {
        self.column(Field::Name, column)
    }

    /// Append a website candidate. Candidates are tried in the order added;
    /// the first non-empty, safe one wins.
    pub fn website(mut self, column: impl Into<Column>) -> Self {
        self.website.push(column.into());
        self
    }

    /// Column holding the free-text description.
    pub fn description(self, column: impl Into<Column>) -> Self {
        self.column(Field::Description, column)
    }

    /// Column holding the comma-separated energy types.
    pub fn energy_types(self, column: impl Into<Column>) -> Self {
        self.column(Field::EnergyTypes, column)
    }

    /// Column holding the location label.
    pub fn location(self, column: impl Into<Column>) -> Self {
        self.column(Field::Location, column)
    }

    /// Column holding the country.
    pub fn country(self, column: impl Into<Column>) -> Self {
        self.column(Field::Country, column)
    }

    /// Column holding the optional region.
    pub fn region(self, column: impl Into<Column>) -> Self {
        self.column(Field::Region, column)
    }

    /// Column holding the logo path or URL.
    pub fn logo(self, column: impl Into<Column>) -> Self {
        self.column(Field::Logo, column)
    }

    /// Column holding the featured flag, decoded with [`FeaturedEncoding`].
    pub fn featured(self, column: impl Into<Column>) -> Self {
        self.column(Field::Featured, column)
    }

    /// Column holding the tag list.
    pub fn tags(self, column: impl Into<Column>) -> Self {
        self.column(Field::Tags, column)
    }

    /// Separator for services, products, certifications and tags.
    pub fn list_delimiter(mut self, delimiter: char) -> Self {
        self.list_delimiter = delimiter;
        self
    }

    /// How the featured column is read. Default: [`FeaturedEncoding::Boolean`].
    pub fn featured_encoding(mut self, encoding: FeaturedEncoding) -> Self {
        self.featured_encoding = encoding;
        self
    }

    /// Rows with fewer fields than this are skipped.
    pub fn min_columns(mut self, count: usize) -> Self {
        self.min_columns = count;
        self
    }

    /// Number of leading rows to drop before mapping. Header labels are
    /// resolved against the first of them.
    pub fn header_rows(mut self, count: usize) -> Self {
        self.header_rows = count;
        self
    }

    /// Rows dropped from the top of the source before mapping.
    pub fn header_row_count(&self) -> usize {
        self.header_rows
    }

    /// Fewest fields a row needs to be mapped.
    pub fn min_column_count(&self) -> usize {
        self.min_columns
    }

    /// Turn every [`Column::Header`] into a position using `header`.
    ///
    /// Labels missing from `header` are logged and the field is treated as
    /// absent for every row.
    pub fn resolve(&self, header: &[String]) -> ResolvedSchema {
        let positions: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, label)| (label.trim().to_lowercase(), i))
            .rev()
            .collect();

        let lookup = |column: &Column| match column {
            Column::Index(i) => Some(*i),
            Column::Header(label) => {
                let found = positions.get(&label.trim().to_lowercase()).copied();
                if found.is_none() {
                    tracing::warn!(label = %label, "Header label not found in source");
                }
                found
            }
        };

        ResolvedSchema {
            columns: self
                .columns
                .iter()
                .filter_map(|(field, column)| lookup(column).map(|i| (*field, i)))
                .collect(),
            website: self.website.iter().filter_map(lookup).collect(),
            list_delimiter: self.list_delimiter,
            featured_encoding: self.featured_encoding.clone(),
            min_columns: self.min_columns,
            header_rows: self.header_rows,
        }
    }
}

impl Default for SchemaMap {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`SchemaMap`] with every column turned into a position.
#[derive(Clone, Debug)]
pub struct ResolvedSchema {
    columns: HashMap<Field, usize>,
    website: Vec<usize>,
    pub(crate) list_delimiter: char,
    pub(crate) featured_encoding: FeaturedEncoding,
    pub(crate) min_columns: usize,
    pub(crate) header_rows: usize,
}

impl ResolvedSchema {
    /// Trimmed, non-empty cell for `field`, if mapped and present.
    pub fn cell<'r>(&self, field: Field, row: &'r [String]) -> Option<&'r str> {
        self.columns
            .get(&field)
            .and_then(|&i| non_empty(row, i))
    }

    /// Trimmed, non-empty website candidates in priority order.
    pub fn website_cells<'r>(&self, row: &'r [String]) -> impl Iterator<Item = &'r str> {
        self.website.iter().filter_map(move |&i| non_empty(row, i))
    }

    /// Position `field` resolved to, if any.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

fn non_empty(row: &[String], index: usize) -> Option<&str> {
    row.get(index).map(|v| v.trim()).filter(|v| !v.is_empty())
}
