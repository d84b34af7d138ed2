//! Compiled-in content: the seed gallery and default studio singletons.
//!
//! The seed projects guarantee the public gallery is never empty before
//! any admin content exists, and the default singletons let the site
//! render on a fresh install with no remote store and no local snapshot.

use crate::content::{AboutInfo, ContactInfo, Project};
use crate::localized::Localized;

/// Ids of the compiled-in seed projects all start with this prefix, which
/// keeps them distinguishable from store-generated document ids.
pub const SEED_ID_PREFIX: &str = "p";

/// The three projects every install starts with.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "p1".to_string(),
            title: Localized::plain("Luxury Villa"),
            category: Localized::plain("Architecture"),
            location: "Riyadh, KSA".to_string(),
            year: "2023".to_string(),
            description: Localized::new(
                "A modern luxury villa blending traditional elements with contemporary design.",
                "فيلا فاخرة حديثة تمزج بين العناصر التقليدية والتصميم المعاصر.",
                "Geleneksel unsurları çağdaş tasarımla harmanlayan modern lüks bir villa.",
            ),
            cover_image:
                "https://images.unsplash.com/photo-1600596542815-27b88e31e640?q=80&w=2000&auto=format&fit=crop"
                    .to_string(),
            ..Project::default()
        },
        Project {
            id: "p2".to_string(),
            title: Localized::plain("Urban Loft"),
            category: Localized::plain("Interior"),
            location: "Dubai, UAE".to_string(),
            year: "2024".to_string(),
            description: Localized::new(
                "Open concept loft design maximizing natural light and space.",
                "تصميم علوي مفتوح يعزز الإضاءة الطبيعية والمساحة.",
                "Doğal ışığı ve mekanı maksimize eden açık konsept loft tasarımı.",
            ),
            cover_image:
                "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?q=80&w=2000&auto=format&fit=crop"
                    .to_string(),
            ..Project::default()
        },
        Project {
            id: "p3".to_string(),
            title: Localized::plain("Modern Office"),
            category: Localized::plain("Interior"),
            location: "Doha, Qatar".to_string(),
            year: "2022".to_string(),
            description: Localized::new(
                "Corporate headquarters designed for collaboration and productivity.",
                "مقر شركة مصمم لتعزيز التعاون والإنتاجية.",
                "İşbirliği ve üretkenlik için tasarlanmış kurumsal merkez.",
            ),
            cover_image:
                "https://images.unsplash.com/photo-1497366216548-37526070297c?q=80&w=2000&auto=format&fit=crop"
                    .to_string(),
            ..Project::default()
        },
    ]
}

/// The studio identity shown until an admin saves their own.
pub fn default_about() -> AboutInfo {
    AboutInfo {
        name: Localized::new("Mariam Al-Haidari", "مريم الحيدري", "Mariam Al-Haidari"),
        bio: Localized::new(
            "An architect obsessed with the 'Why' before the 'How'.",
            "مهندسة معمارية مهووسة بـ 'اللماذا' قبل 'الكيف'.",
            "Mimarlığın 'Nasıl'ından önce 'Neden'ine odaklanan bir mimar.",
        ),
        philosophy: Localized::new(
            "Minimal intervention for maximum impact.",
            "التدخل الأدنى للأثر الأقصى.",
            "Maksimum etki için minimum müdahale.",
        ),
        statement: Localized::new(
            "Architecture is about meaning.",
            "العمارة تتعلق بالمعنى.",
            "Mimarlık anlamla ilgilidir.",
        ),
        profile_image:
            "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?q=80&w=800&auto=format&fit=crop"
                .to_string(),
        resume_url: String::new(),
        ..AboutInfo::default()
    }
}

/// The contact card shown until an admin saves their own.
pub fn default_contact() -> ContactInfo {
    ContactInfo {
        phone: "+966 50 000 0000".to_string(),
        email: "studio@arc-elite.com".to_string(),
        instagram: "@arc.studio".to_string(),
        address: Localized::new(
            "Riyadh, Saudi Arabia",
            "الرياض، المملكة العربية السعودية",
            "Riyad, Suudi Arabistan",
        ),
    }
}
