use folio_model::{Experience, GeneralText, Hero, Project, SocialLink, Technology};

use super::{PgContent, PgQuery};

impl PgContent for GeneralText {
    const COLUMNS: &'static [&'static str] = &["id", "key", "text_es", "text_en"];
    const ORDER_BY: Option<&'static str> = Some("key ASC");

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(&self.key)
            .bind(&self.text_es)
            .bind(&self.text_en)
    }
}

impl PgContent for Hero {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "greeting_es",
        "greeting_en",
        "title",
        "subtitle_es",
        "subtitle_en",
        "cv_url",
    ];
    // Updated tuples move on disk; a fixed order keeps the first hero first.
    const ORDER_BY: Option<&'static str> = Some("id ASC");

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(&self.greeting_es)
            .bind(&self.greeting_en)
            .bind(&self.title)
            .bind(&self.subtitle_es)
            .bind(&self.subtitle_en)
            .bind(&self.cv_url)
    }
}

impl PgContent for Project {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        r#""order""#,
        "title_es",
        "title_en",
        "description_es",
        "description_en",
        "image_url",
        "gallery_urls",
        "tech",
        "live_url",
        "github_url",
    ];
    const ORDER_BY: Option<&'static str> = Some(r#""order" ASC"#);

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.order)
            .bind(&self.title_es)
            .bind(&self.title_en)
            .bind(&self.description_es)
            .bind(&self.description_en)
            .bind(&self.image_url)
            .bind(&self.gallery_urls)
            .bind(&self.tech)
            .bind(&self.live_url)
            .bind(&self.github_url)
    }
}

impl PgContent for Experience {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        r#""order""#,
        "position_es",
        "position_en",
        "company",
        "period_es",
        "period_en",
        "description_items_es",
        "description_items_en",
        "technologies",
    ];
    const ORDER_BY: Option<&'static str> = Some(r#""order" ASC"#);

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.order)
            .bind(&self.position_es)
            .bind(&self.position_en)
            .bind(&self.company)
            .bind(&self.period_es)
            .bind(&self.period_en)
            .bind(&self.description_items_es)
            .bind(&self.description_items_en)
            .bind(&self.technologies)
    }
}

impl PgContent for Technology {
    const COLUMNS: &'static [&'static str] =
        &["id", r#""order""#, "name", "logo_url", "category"];
    const ORDER_BY: Option<&'static str> = Some(r#""order" ASC"#);

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.order)
            .bind(&self.name)
            .bind(&self.logo_url)
            .bind(self.category.as_str())
    }
}

impl PgContent for SocialLink {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "url",
        "display_text_es",
        "display_text_en",
        "icon_key",
    ];
    const ORDER_BY: Option<&'static str> = Some("name ASC");

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.url)
            .bind(&self.display_text_es)
            .bind(&self.display_text_en)
            .bind(&self.icon_key)
    }
}
