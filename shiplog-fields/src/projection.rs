//! List and form projections of an entity descriptor.

use crate::types::{EntityDef, FieldDef};

/// Fields shown as list columns, in declaration order.
pub fn list_fields(entity: &EntityDef) -> Vec<&FieldDef> {
    entity.fields.iter().filter(|f| f.in_list()).collect()
}

/// Fields rendered in create/edit forms, in declaration order.
pub fn form_fields(entity: &EntityDef) -> Vec<&FieldDef> {
    entity.fields.iter().filter(|f| f.in_form()).collect()
}

impl EntityDef {
    pub fn list_fields(&self) -> Vec<&FieldDef> {
        list_fields(self)
    }

    pub fn form_fields(&self) -> Vec<&FieldDef> {
        form_fields(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DefaultSort, FieldType, SortDirection};

    fn entity(fields: Vec<FieldDef>) -> EntityDef {
        let first = fields[0].name.clone();
        EntityDef {
            name: "Post".into(),
            plural_name: "Posts".into(),
            slug: "posts".into(),
            icon: None,
            fields,
            title_field: first.clone(),
            description_field: None,
            default_sort: DefaultSort {
                field: first,
                direction: SortDirection::Desc,
            },
            allow_create: true,
            allow_edit: true,
            allow_delete: true,
            allow_export: true,
        }
    }

    fn names(fields: &[&FieldDef]) -> Vec<String> {
        fields.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn all_fields_listed_when_none_opt_out() {
        let e = entity(vec![
            FieldDef::new("a", "A", FieldType::Text),
            FieldDef::new("b", "B", FieldType::Number).show_in_list(true),
            FieldDef::new("c", "C", FieldType::Date),
        ]);
        assert_eq!(names(&list_fields(&e)), ["a", "b", "c"]);
        assert_eq!(names(&form_fields(&e)), ["a", "b", "c"]);
    }

    #[test]
    fn opting_out_removes_only_that_field() {
        let e = entity(vec![
            FieldDef::new("a", "A", FieldType::Text),
            FieldDef::new("b", "B", FieldType::Tags).show_in_list(false),
            FieldDef::new("c", "C", FieldType::Url),
        ]);
        assert_eq!(names(&e.list_fields()), ["a", "c"]);
    }

    #[test]
    fn list_and_form_flags_are_independent() {
        let e = entity(vec![
            FieldDef::new("title", "Title", FieldType::Text),
            FieldDef::new("generated_at", "Generated", FieldType::Datetime).show_in_form(false),
            FieldDef::new("source_commits", "Commits", FieldType::Tags)
                .show_in_list(false)
                .show_in_form(true),
        ]);
        assert_eq!(names(&e.list_fields()), ["title", "generated_at"]);
        assert_eq!(names(&e.form_fields()), ["title", "source_commits"]);
    }
}
