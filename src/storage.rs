/// One directory entry.
///
/// The phone token is kept as it appears in the directory file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    name: String,
    phone: String,
}

impl Record {
    pub fn new<S: Into<String>>(phone: S, name: S) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl AsRef<str> for Record {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// An indexable sequence of named items that can be reordered in place
pub trait Sortable {
    fn len(&self) -> usize;

    fn name_at(&self, index: usize) -> &str;

    fn swap(&mut self, i: usize, j: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: AsRef<str>> Sortable for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn name_at(&self, index: usize) -> &str {
        self[index].as_ref()
    }

    fn swap(&mut self, i: usize, j: usize) {
        <[T]>::swap(self, i, j)
    }
}

impl<T: AsRef<str>> Sortable for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn name_at(&self, index: usize) -> &str {
        self[index].as_ref()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j)
    }
}

/// The record store every strategy runs against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<Record>,
    ordered: bool,
}

impl Directory {
    pub fn new(entries: Vec<Record>) -> Self {
        Self {
            entries,
            ordered: false,
        }
    }

    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once a sort finished within its budget
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub(crate) fn set_ordered(&mut self, ordered: bool) {
        self.ordered = ordered;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.entries.iter()
    }
}

impl Sortable for Directory {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn name_at(&self, index: usize) -> &str {
        self.entries[index].name()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.entries.swap(i, j)
    }
}

impl FromIterator<Record> for Directory {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
