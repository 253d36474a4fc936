use mongodb::bson::{doc, Bson, Document};

/// Match predicate over stored documents.
///
/// Built by callers without knowledge of the backend; the MongoDB gateway renders it
/// with [`Filter::to_document`] and the in-memory gateway evaluates it with
/// [`Filter::matches`].
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// The field is a string equal to `value`.
    Equals { field: String, value: String },
    /// The field is a string containing `needle`, ignoring case.
    ContainsIgnoreCase { field: String, needle: String },
    /// Every inner predicate matches.
    And(Vec<Filter>),
    /// At least one inner predicate matches.
    AnyOf(Vec<Filter>),
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Conjunction of `filters`. `All` members are dropped, an empty conjunction is `All`
    /// and a single member is returned as is.
    pub fn and(filters: Vec<Filter>) -> Self {
        let mut filters: Vec<Filter> = filters
            .into_iter()
            .filter(|filter| *filter != Filter::All)
            .collect();

        match filters.len() {
            0 => Filter::All,
            1 => filters.remove(0),
            _ => Filter::And(filters),
        }
    }

    /// Renders the predicate as a MongoDB query document.
    ///
    /// Search needles are regex-escaped so that they match literally.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Equals { field, value } => {
                let mut document = Document::new();
                document.insert(field.clone(), value.clone());
                document
            }
            Filter::ContainsIgnoreCase { field, needle } => {
                let pattern = regex::escape(needle);
                let mut document = Document::new();
                document.insert(field.clone(), doc! { "$regex": pattern, "$options": "i" });
                document
            }
            Filter::And(filters) => doc! { "$and": render_all(filters) },
            Filter::AnyOf(filters) => doc! { "$or": render_all(filters) },
        }
    }

    /// Evaluates the predicate against a document held in memory.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Equals { field, value } => {
                matches!(document.get(field), Some(Bson::String(found)) if found == value)
            }
            Filter::ContainsIgnoreCase { field, needle } => match document.get(field) {
                Some(Bson::String(found)) => {
                    found.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Filter::And(filters) => filters.iter().all(|filter| filter.matches(document)),
            Filter::AnyOf(filters) => filters.iter().any(|filter| filter.matches(document)),
        }
    }
}

fn render_all(filters: &[Filter]) -> Vec<Bson> {
    filters
        .iter()
        .map(|filter| Bson::Document(filter.to_document()))
        .collect()
}
