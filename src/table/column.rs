use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[cfg(not(feature = "web"))]
thread_local! {
    static COLLATOR: Option<icu_collator::CollatorBorrowed<'static>> = {
        use icu_collator::options::{CollatorOptions, Strength};

        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Tertiary);
        icu_collator::Collator::try_new(Default::default(), options).ok()
    };
}

/// Locale-aware text ordering: accented letters sort next to their base
/// letter. Falls back to code point order without collation data.
#[cfg(not(feature = "web"))]
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|c| match c {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

/// Locale-aware text ordering through the browser's `localeCompare`.
#[cfg(feature = "web")]
pub fn collate(a: &str, b: &str) -> Ordering {
    let n = js_sys::JsString::from(a).locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new());
    n.cmp(&0)
}

/// A primitive cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Number(f64),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Orders two non-null values: numbers by difference, text
    /// case-insensitively, numbers before text.
    pub(crate) fn cmp_present(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Text(a), Value::Text(b)) => collate(&a.to_lowercase(), &b.to_lowercase()),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Lowercased text used by search; `None` never matches.
    pub(crate) fn search_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.to_lowercase()),
            Value::Number(_) => Some(self.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One row of a table: field name to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// Absent fields read as `Null`.
    pub fn get(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get(field).unwrap_or(&NULL)
    }
}

pub type Renderer = Rc<dyn Fn(&Value, &Record) -> String>;

/// Describes one column: which field it shows and how.
#[derive(Clone)]
pub struct Column {
    pub title: String,
    pub field: String,
    pub searchable: bool,
    pub orderable: bool,
    render: Option<Renderer>,
}

impl Column {
    /// Searchable, orderable, rendered as the raw value.
    pub fn new(title: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field: field.into(),
            searchable: true,
            orderable: true,
            render: None,
        }
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    pub fn render(mut self, f: impl Fn(&Value, &Record) -> String + 'static) -> Self {
        self.render = Some(Rc::new(f));
        self
    }

    pub fn value<'r>(&self, record: &'r Record) -> &'r Value {
        record.get(&self.field)
    }

    pub fn render_cell(&self, record: &Record) -> String {
        let value = self.value(record);
        match &self.render {
            Some(f) => f(value, record),
            None => value.to_string(),
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        let same_render = match (&self.render, &other.render) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.title == other.title
            && self.field == other.field
            && self.searchable == other.searchable
            && self.orderable == other.orderable
            && same_render
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("field", &self.field)
            .field("searchable", &self.searchable)
            .field("orderable", &self.orderable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let col = Column::new("Team", "name");
        assert!(col.searchable);
        assert!(col.orderable);
        let rec = Record::new().with("name", "Alpha");
        assert_eq!(col.render_cell(&rec), "Alpha");
    }

    #[test]
    fn missing_field_renders_empty() {
        let col = Column::new("Name", "name");
        let rec = Record::new().with("id", "x");
        assert!(col.value(&rec).is_null());
        assert_eq!(col.render_cell(&rec), "");
    }

    #[test]
    fn render_sees_whole_record() {
        let col = Column::new("Who", "id").render(|v, r| format!("{} <{}>", r.get("name"), v));
        let rec = Record::new().with("id", "jdoe").with("name", "Jane");
        assert_eq!(col.render_cell(&rec), "Jane <jdoe>");
    }

    #[test]
    fn accented_text_sorts_with_its_base_letter() {
        assert_eq!(collate("émile", "zoe"), Ordering::Less);
        assert_eq!(collate("adam", "émile"), Ordering::Less);
        let a = Value::from("Émile");
        let b = Value::from("Zoe");
        assert_eq!(a.cmp_present(&b), Ordering::Less);
    }

    #[test]
    fn number_display() {
        assert_eq!(Value::from(5.0).to_string(), "5");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(None::<f64>).to_string(), "");
    }
}
