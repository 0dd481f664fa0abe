//! Whether a list page shows its create/edit form, chosen by the query string.

use serde::{Deserialize, Deserializer};

/// The query parameters that open the form on a list page: `?form=new` to
/// create an entity or `?edit=<id>` to edit one.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct FormQuery {
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default, deserialize_with = "deserialize_edit_id")]
    pub edit: Option<i64>,
}

/// Read the `edit` parameter, treating an ID that is not a number as absent so
/// the page still renders.
fn deserialize_edit_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    match raw.trim().parse() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            tracing::warn!("Ignoring invalid edit ID {raw:?}");
            Ok(None)
        }
    }
}

/// The state of the form on a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode<T> {
    Hidden,
    Creating,
    Editing(T),
}

impl FormQuery {
    /// Pick the form mode, looking up the entity to edit in the list the page
    /// already fetched.
    ///
    /// An unknown ID hides the form, e.g. when the entity was deleted in
    /// another tab.
    pub fn resolve<T: Clone>(&self, items: &[T], id_of: impl Fn(&T) -> i64) -> FormMode<T> {
        if let Some(id) = self.edit {
            return match items.iter().find(|item| id_of(item) == id) {
                Some(item) => FormMode::Editing(item.clone()),
                None => {
                    tracing::warn!("Tried to edit entity {id} that is not in the list");
                    FormMode::Hidden
                }
            };
        }

        match self.form.as_deref() {
            Some("new") => FormMode::Creating,
            _ => FormMode::Hidden,
        }
    }
}

/// The URL of a list page with the create form open.
pub fn new_form_url(list_url: &str) -> String {
    format!("{list_url}?form=new")
}

/// The URL of a list page with the edit form open for entity `id`.
pub fn edit_form_url(list_url: &str, id: i64) -> String {
    format!("{list_url}?edit={id}")
}

#[cfg(test)]
mod tests {
    use super::{FormMode, FormQuery, edit_form_url, new_form_url};

    const ITEMS: [(i64, &str); 2] = [(1, "Main"), (2, "Card")];

    fn resolve(query: &str) -> FormMode<(i64, &'static str)> {
        let query: FormQuery = serde_urlencoded::from_str(query).unwrap();
        query.resolve(&ITEMS, |item| item.0)
    }

    #[test]
    fn resolves_each_mode() {
        assert_eq!(resolve(""), FormMode::Hidden);
        assert_eq!(resolve("form=new"), FormMode::Creating);
        assert_eq!(resolve("edit=2"), FormMode::Editing((2, "Card")));
        assert_eq!(resolve("form=other"), FormMode::Hidden);
    }

    #[test]
    fn unknown_edit_id_hides_form() {
        assert_eq!(resolve("edit=99"), FormMode::Hidden);
    }

    #[test]
    fn malformed_edit_id_hides_form() {
        assert_eq!(resolve("edit=abc"), FormMode::Hidden);
        assert_eq!(resolve("edit="), FormMode::Hidden);
        assert_eq!(resolve("form=new&edit=1.5"), FormMode::Creating);
    }

    #[test]
    fn builds_form_urls() {
        assert_eq!(new_form_url("/accounts"), "/accounts?form=new");
        assert_eq!(edit_form_url("/budgets", 4), "/budgets?edit=4");
    }
}
