macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions
pub mod v1 {
    use folio_model::ContentKind;

    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub const PAGE: &str = v1_path!("/page");
    pub const LANG: &str = v1_path!("/lang");

    /// Browser-facing pages outside the JSON API.
    pub mod pages {
        pub const LOGIN: &str = "/login";
        pub const ADMIN: &str = "/admin";
    }

    pub mod auth {
        pub const LOGIN: &str = v1_path!("/auth/login");
        pub const LOGOUT: &str = v1_path!("/auth/logout");
    }

    pub mod admin {
        use super::ContentKind;

        pub const ROOT: &str = v1_path!("/admin");
        pub const NOTICES: &str = v1_path!("/admin/notices");
        pub const UPLOAD: &str = v1_path!("/admin/uploads/{bucket}");
        pub const HERO_CV: &str = v1_path!("/admin/hero/{id}/cv");
        pub const PROJECT_IMAGE: &str = v1_path!("/admin/projects/{id}/image");
        pub const PROJECT_GALLERY: &str = v1_path!("/admin/projects/{id}/gallery");
        pub const TECHNOLOGY_LOGO: &str = v1_path!("/admin/technologies/{id}/logo");

        /// `/api/v1/admin/{section}`
        pub fn collection(kind: ContentKind) -> String {
            format!("{ROOT}/{}", kind.table())
        }

        /// `/api/v1/admin/{section}/{id}` as a route pattern.
        pub fn item(kind: ContentKind) -> String {
            format!("{}/{{id}}", collection(kind))
        }

        pub fn move_item(kind: ContentKind) -> String {
            format!("{}/{{id}}/move", collection(kind))
        }

        /// Add/remove one entry of an array column.
        pub fn list_field(kind: ContentKind) -> String {
            format!("{}/{{id}}/lists/{{field}}", collection(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::v1;
    use folio_model::ContentKind;

    #[test]
    fn section_routes_use_table_names() {
        assert_eq!(
            v1::admin::collection(ContentKind::GeneralText),
            "/api/v1/admin/general_text"
        );
        assert_eq!(
            v1::admin::item(ContentKind::Projects),
            "/api/v1/admin/projects/{id}"
        );
        assert_eq!(
            v1::admin::move_item(ContentKind::Technologies),
            "/api/v1/admin/technologies/{id}/move"
        );
        assert_eq!(
            v1::admin::list_field(ContentKind::Experience),
            "/api/v1/admin/experience/{id}/lists/{field}"
        );
        assert_eq!(v1::admin::HERO_CV, "/api/v1/admin/hero/{id}/cv");
    }
}
