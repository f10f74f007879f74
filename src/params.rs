use std::ops::Index;
use std::slice;

/// A single bound parameter, consisting of a key and a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// The parameters bound by one match, in the order they were bound.
///
/// Each name appears at most once. If a pattern binds the same name twice,
/// the later value wins.
/// ```rust
/// # use segtrie::Router;
/// let mut router = Router::new();
/// router.insert("/blog/:category/:post", ()).unwrap();
///
/// let matched = router.at("/blog/rust/routers");
/// let params = &matched[0].params;
/// assert_eq!(params.get("post"), Some("routers"));
/// assert_eq!(params[0].key, "category");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(Vec<Param>);

impl Params {
    /// Returns the value bound to the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.0
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Param> {
        self.0.iter()
    }

    /// Returns a copy with `key` bound to `value`.
    pub(crate) fn with(&self, key: &str, value: impl Into<String>) -> Params {
        let mut params = self.clone();
        let value = value.into();
        match params.0.iter_mut().find(|param| param.key == key) {
            Some(param) => param.value = value,
            None => params.0.push(Param {
                key: key.to_owned(),
                value,
            }),
        }
        params
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, i: usize) -> &Param {
        &self.0[i]
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
