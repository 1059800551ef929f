//! Static reference lists consumed by the host UI and the schools
//! export. Nothing here is computed.

pub const SCHOOLS: [&str; 14] = [
    "مدرسة النيل الابتدائية",
    "مدرسة الشهيد أحمد حمدي الابتدائية",
    "مدرسة طه حسين الابتدائية",
    "مدرسة الزهراء الابتدائية",
    "مدرسة عمر بن الخطاب الابتدائية",
    "مدرسة المستقبل الابتدائية",
    "مدرسة النصر الابتدائية",
    "مدرسة السلام الابتدائية",
    "مدرسة أحمد زويل الابتدائية",
    "مدرسة الوحدة العربية الابتدائية",
    "مدرسة نجيب محفوظ الابتدائية",
    "مدرسة الفتح الابتدائية",
    "مدرسة الأمل الابتدائية",
    "مدرسة مصطفى كامل الابتدائية",
];

/// Core subjects expected to be distributed across the cadre,
/// `(display name, short code)`.
pub const SUBJECTS: [(&str, &str); 6] = [
    ("اللغة العربية", "AR"),
    ("الرياضيات", "MATH"),
    ("اللغة الإنجليزية", "EN"),
    ("العلوم", "SC"),
    ("الدراسات الاجتماعية", "SS"),
    ("التربية الإسلامية", "IS"),
];
