//! Lexicon loading and caching
//!
//! A compact seed of epidemiology terminology bootstraps detection; a JSON
//! cache file can extend it offline. The process-wide lexicon is built
//! once behind a `OnceLock` accessor — the handle is stateless between
//! calls, so no teardown exists.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use warraq_ast::{normalize_term, GlossaryEntry};

use crate::error::Result;

/// A term lexicon with a normalized-term index
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<GlossaryEntry>,
    index: HashMap<String, usize>,
}

impl Lexicon {
    /// Build a lexicon from entries; later duplicates of a normalized term
    /// are ignored.
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Self {
        let mut lexicon = Lexicon::default();
        for entry in entries {
            lexicon.insert(entry);
        }
        lexicon
    }

    /// The built-in seed lexicon
    pub fn seed() -> Self {
        Self::from_entries(seed_entries())
    }

    /// Load entries from a JSON cache file (an array of entries),
    /// falling back to the seed when the file is missing or malformed.
    pub fn from_cache_file(path: &Path) -> Self {
        match Self::try_from_cache_file(path) {
            Ok(lexicon) => lexicon,
            Err(e) => {
                log::warn!("lexicon cache unusable ({}), using seed", e);
                Self::seed()
            }
        }
    }

    fn try_from_cache_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let entries: Vec<GlossaryEntry> = serde_json::from_str(&data)?;
        Ok(Self::from_entries(entries))
    }

    /// Add an entry; first entry for a normalized term wins.
    pub fn insert(&mut self, entry: GlossaryEntry) {
        let key = normalize_term(&entry.term);
        if key.is_empty() || self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
    }

    /// Look up an entry by its normalized term
    pub fn get(&self, normalized: &str) -> Option<&GlossaryEntry> {
        self.index.get(normalized).map(|&i| &self.entries[i])
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the lexicon holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide lexicon, built once on first use.
///
/// Honors the `WARRAQ_LEXICON_CACHE` environment variable pointing at a
/// JSON cache file; otherwise the seed is used.
pub fn global() -> &'static Lexicon {
    static LEXICON: OnceLock<Lexicon> = OnceLock::new();
    LEXICON.get_or_init(|| match std::env::var("WARRAQ_LEXICON_CACHE") {
        Ok(path) => Lexicon::from_cache_file(Path::new(&path)),
        Err(_) => Lexicon::seed(),
    })
}

/// The compact built-in seed: core epidemiology vocabulary.
fn seed_entries() -> Vec<GlossaryEntry> {
    [
        ("Cross-Sectional Study", "دراسة مقطعية عرضية", "دراسة تُقَيِّم حالة عيّنة من السكان في نقطة زمنية واحدة."),
        ("Cohort Study", "دراسة أترابية", "تتبّع مجموعة مشتركة في تعرّض ما مع مقارنة نِتاجات صحية بمرور الوقت."),
        ("Case-Control Study", "دراسة حالة-شاهد", "مقارنة بين ذوي الحالة ومجموعة شاهد لتقييم العلاقة مع عوامل خطورة سابقة."),
        ("Randomized Clinical Trial", "تجربة سريرية عشوائية", "تقسيم المشاركين عشوائيًا لتقييم فاعلية تدخل طبي تحت ضبط."),
        ("Quasi-Experimental", "شبه تجريبية", "تصميمات تدخلية بلا عشوائية كاملة، تستخدم موازنة أو ضوابط بديلة."),
        ("Odds Ratio", "نسبة الأرجحية", "قياس لارتباط التعرّض بالحدث في الدراسات الحالة-شاهد."),
        ("Relative Risk", "الخطر النسبي", "نسبة مخاطر الحدث بين مجموعتين (تعرّض مقابل عدم تعرّض)."),
        ("Incidence", "الحدوث", "عدد الحالات الجديدة خلال فترة محددة بين معرّضين للخطر."),
        ("Prevalence", "الانتشار", "عدد كل الحالات الحالية (قديمة/جديدة) في لحظة زمنية محددة."),
        ("Confidence Interval", "فاصل الثقة", "مجال يُرجَّح أن يحتوي القيمة الحقيقية للمعلمة بنسبة معيّنة."),
        ("P-Value", "قيمة P", "احتمال الحصول على نتيجة مثل المرصودة أو أشد إذا كانت الفرضية الصفرية صحيحة."),
        ("Bias", "انحياز", "خطأ منهجي يؤدي لتقدير غير دقيق للارتباط أو الأثر."),
        ("Confounding", "إرباك (التباس)", "تداخل عامل خارجي مرتبط بالتعرّض والنتيجة يشوّه الارتباط."),
        ("Validity", "الصِدق", "مدى قياس الأداة لما يفترض قياسه."),
        ("Reliability", "الثبات", "قابلية القياس لإعطاء نتائج متّسقة عند التكرار."),
    ]
    .into_iter()
    .map(|(term, arabic, definition)| GlossaryEntry::new(term, arabic, definition))
    .collect()
}
