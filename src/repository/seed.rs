//! Default site content written on first initialization

use crate::models::{
    BlogFields, ContentItem, MediaItem, MediaType, NewContent, NewMedia, TestimonialFields,
};
use chrono::{DateTime, Utc};

const AUTHOR: &str = "Admin";

/// Four pages, two blog posts and two testimonials, ids `1` to `8`
pub fn default_content(now: DateTime<Utc>) -> Vec<ContentItem> {
    let drafts = vec![
        NewContent::page(
            "Home",
            "Welcome to Tredumo, the revolutionary education management platform.",
            "home",
            AUTHOR,
        ),
        NewContent::page(
            "About",
            "Tredumo was founded in 2022 with a mission to transform education management.",
            "about",
            AUTHOR,
        ),
        NewContent::page(
            "Privacy Policy",
            "At Tredumo, we take your privacy seriously. This policy explains how we collect and use your data.",
            "privacy",
            AUTHOR,
        ),
        NewContent::page(
            "Terms of Service",
            "By using Tredumo, you agree to these terms of service.",
            "terms",
            AUTHOR,
        ),
        NewContent::blog(
            "The Future of Education Management",
            "Explore how AI is transforming education management systems worldwide.",
            "future-education-management",
            AUTHOR,
            BlogFields {
                featured: Some(true),
                category: Some("Technology".to_string()),
                tags: Some(tags(&["AI", "Education", "Future"])),
            },
        ),
        NewContent::blog(
            "Streamlining Admissions Processes",
            "Learn how to improve your institution's admissions workflow.",
            "streamlining-admissions",
            AUTHOR,
            BlogFields {
                featured: None,
                category: Some("Best Practices".to_string()),
                tags: Some(tags(&["Admissions", "Workflow", "Efficiency"])),
            },
        ),
        NewContent::testimonial(
            "Transformed Our Institution",
            "Tredumo has completely transformed how we manage our educational processes.",
            "testimonial-1",
            "Jude Lubega",
            TestimonialFields {
                position: Some("Vice Chancellor".to_string()),
                company: Some("Nkumba University".to_string()),
            },
        ),
        NewContent::testimonial(
            "Incredible Analytics",
            "The AI-driven insights have helped us identify areas for improvement that we never would have noticed otherwise.",
            "testimonial-2",
            "Hakim Mulinde",
            TestimonialFields {
                position: Some("CTO".to_string()),
                company: Some("Nkumba University".to_string()),
            },
        ),
    ];

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| draft.into_item((i + 1).to_string(), now, now))
        .collect()
}

/// Two dashboard screenshots, ids `9` and `10`
pub fn default_media(now: DateTime<Utc>) -> Vec<MediaItem> {
    let previews = [
        ("9", "Dashboard Preview", "photo-1531403009284-440f080d1e12"),
        ("10", "Analytics Dashboard", "photo-1551288049-bebda4e38f71"),
    ];

    previews
        .iter()
        .map(|(id, title, photo)| {
            let url = format!(
                "https://images.unsplash.com/{}?auto=format&fit=crop&q=80",
                photo
            );
            NewMedia::new(MediaType::Image, *title, url.clone(), AUTHOR)
                .thumbnail_url(format!("{}&w=200", url))
                .dimensions("1920x1080")
                .into_item(id.to_string(), now)
        })
        .collect()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;
    use std::collections::HashSet;

    #[test]
    fn test_default_content_shape() {
        let items = default_content(Utc::now());
        let count = |t: ContentType| items.iter().filter(|i| i.content_type() == t).count();
        assert_eq!(count(ContentType::Page), 4);
        assert_eq!(count(ContentType::Blog), 2);
        assert_eq!(count(ContentType::Testimonial), 2);
        assert_eq!(items.len(), 8);

        let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
        assert!(items.iter().all(|i| i.created_at == i.updated_at));
    }

    #[test]
    fn test_default_media_shape() {
        let media = default_media(Utc::now());
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].id, "9");
        assert_eq!(media[1].id, "10");
        assert!(media
            .iter()
            .all(|m| m.thumbnail_url.as_deref().unwrap().ends_with("&w=200")));
    }
}
