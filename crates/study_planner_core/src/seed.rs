//! crates/study_planner_core/src/seed.rs
//!
//! The default plan every device starts from before anything is stored.

use crate::domain::{Section, StudyPlan, SubjectData, SubjectId, SubjectTasks, Task};
use std::collections::BTreeMap;

fn task(id: &str, title: &str, duration: &str, content: &str, feeling_after: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        duration: duration.to_string(),
        content: content.to_string(),
        method: None,
        feeling_after: feeling_after.to_string(),
        notebook_lm_link: None,
        past_exams_link: None,
        is_completed: false,
        image_url: None,
    }
}

impl Task {
    fn with_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    fn with_image(mut self, seed: &str) -> Self {
        self.image_url = Some(format!("https://picsum.photos/seed/{}/800/400", seed));
        self
    }
}

fn section(title: &str, tasks: Vec<Task>) -> Section {
    Section {
        title: title.to_string(),
        tasks,
    }
}

fn subject(
    id: SubjectId,
    name: &str,
    color: &str,
    description: &str,
    hero_id: u32,
    tasks: SubjectTasks,
) -> SubjectData {
    SubjectData {
        id,
        name: name.to_string(),
        color: format!("bg-{}-900", color),
        accent_color: format!("border-{}-500", color),
        hero_image: format!("https://picsum.photos/id/{}/1200/600", hero_id),
        description: description.to_string(),
        tasks,
    }
}

pub fn initial_plan() -> StudyPlan {
    let subjects = [
        english(),
        arabic(),
        chemistry(),
        physics(),
        math(),
    ];
    StudyPlan {
        subjects: subjects
            .into_iter()
            .map(|data| (data.id, data))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn english() -> SubjectData {
    subject(
        SubjectId::English,
        "اللغة الإنجليزية",
        "blue",
        "رحلة في عالم اللغة - كلمات، قواعد، وقصة.",
        366,
        SubjectTasks::Flat {
            tasks: vec![
                task("eng_1", "كلمات أول درسين", "30 دقيقة", "حفظ الكلمات + النطق", "إن البداية سهلة ومش مخيفة")
                    .with_method("ربط الكلمة بصورة/موقف")
                    .with_image("eng1"),
                task("eng_2", "حل على الكلمات", "20 دقيقة", "MCQ + جمل", "ثقة في الحفظ")
                    .with_method("تثبيت مش حفظ")
                    .with_image("eng2"),
                task("eng_3", "جرامر الوحدة", "35 دقيقة", "الفكرة العامة + أمثلة", "فهم القاعدة ككل")
                    .with_method("خريطة ذهنية")
                    .with_image("eng3"),
                task("eng_4", "حل على الجرامر", "25 دقيقة", "حل تمارين متنوعة", "احتراف الحل")
                    .with_method("كشف الغلطات")
                    .with_image("eng4"),
                task("eng_5", "قصة الإنجليزي", "30 دقيقة", "قراءة الفصل المقرر", "الاستمتاع بالأحداث")
                    .with_method("قراءة قصصية مش دراسية")
                    .with_image("eng5"),
            ],
        },
    )
}

fn arabic() -> SubjectData {
    subject(
        SubjectId::Arabic,
        "اللغة العربية",
        "emerald",
        "مراجعة النحو الشاملة بأسلوب ممتع.",
        234,
        SubjectTasks::Sectioned {
            sections: vec![
                section(
                    "الوحدة الثانية",
                    vec![
                        task("arb_2_1", "المشتقات العاملة", "30 دقيقة", "اسم الفاعل – اسم المفعول – صيغة المبالغة", "القدرة على التمييز")
                            .with_method("جدول مقارنة + أمثلة")
                            .with_image("arb1"),
                        task("arb_2_2", "المشتقات غير العاملة", "30 دقيقة", "أسلوب التفضيل – اسم الآلة – الزمان والمكان", "الإلمام بالصيغ")
                            .with_method("رسومات تطبيقية")
                            .with_image("arb2"),
                        task("arb_2_3", "المصادر", "25 دقيقة", "المصادر الصريحة والمؤولة", "سهولة الاستخراج")
                            .with_method("تحويل فعل → مصدر")
                            .with_image("arb3"),
                        task("arb_2_4", "مكملات الوحدة الثانية", "35 دقيقة", "اسم الهيئة – اسم المرة – المقصور – الممدود – المنقوص", "اكتمال الوحدة")
                            .with_method("خريطة كبيرة")
                            .with_image("arb4"),
                    ],
                ),
                section(
                    "الوحدة الرابعة",
                    vec![
                        task("arb_4_1", "المفاعيل (1)", "30 دقيقة", "المفعول به – المفعول فيه", "ضبط الجملة"),
                        task("arb_4_2", "المفاعيل (2)", "30 دقيقة", "المطلق – لأجله – معه", "التمكن من المنصوبات"),
                        task("arb_4_3", "الحال والتمييز", "25 دقيقة", "الفرق بين الحال والتمييز", "الدقة في الإعراب"),
                        task("arb_4_4", "الاستثناء والأسماء الخمسة", "30 دقيقة", "أحكام المستثنى", "إتقان الأدوات"),
                    ],
                ),
                section(
                    "الوحدة السادسة",
                    vec![
                        task("arb_6_1", "كم وحروف الجر", "30 دقيقة", "كم الاستفهامية والخبرية", "فهم الأدوات"),
                        task("arb_6_2", "أسلوب النداء", "20 دقيقة", "أنواع المنادى", "سهولة المناداة"),
                        task("arb_6_3", "أنواع ما - من - لا", "25 دقيقة", "التفرقة بين الحروف", "عدم اللبس"),
                    ],
                ),
                section(
                    "الوحدة السابعة",
                    vec![
                        task("arb_7_1", "الممنوع من الصرف", "30 دقيقة", "العلل والموانع", "إتقان الممنوع"),
                        task("arb_7_2", "الأساليب", "30 دقيقة", "المدح – الذم – الاختصاص – التعجب", "تنوع الأساليب"),
                        task("arb_7_3", "التوابع", "35 دقيقة", "النعت – العطف – التوكيد – البدل", "ضبط التوابع"),
                        task("arb_7_4", "الملحقات والكشف", "25 دقيقة", "المعجم وأسماء الأفعال", "ختام النحو"),
                    ],
                ),
            ],
        },
    )
}

fn chemistry() -> SubjectData {
    let lessons = [
        ("chem_1", "مراجعة الدرس الأول", "25 دقيقة", "الخلايا الجلفانية", "استرجاع الأساسيات"),
        ("chem_2", "حل الدرس الأول", "20 دقيقة", "تطبيقات الخلايا", "تثبيت المعلومة"),
        ("chem_3", "مراجعة الدرس الثاني", "25 دقيقة", "سلسلة الجهود", "فهم الترتيب"),
        ("chem_4", "حل الدرس الثاني", "20 دقيقة", "مسائل ق د ك", "حل المسائل"),
        ("chem_5", "مراجعة الدرس الثالث", "25 دقيقة", "الخلايا الإلكتروليتية", "فهم التحليل"),
        ("chem_6", "حل الدرس الثالث", "20 دقيقة", "تطبيقات التحليل", "الربط بالواقع"),
        ("chem_7", "مراجعة الدرس الرابع", "25 دقيقة", "قوانين فاراداي", "التمكن الرياضي"),
        ("chem_8", "حل الدرس الرابع", "20 دقيقة", "مسائل القوانين", "إنجاز الفصل"),
    ];
    subject(
        SubjectId::Chemistry,
        "الكيمياء",
        "purple",
        "مراجعة مكثفة للفصل الرابع - الكيمياء الكهربية.",
        400,
        SubjectTasks::Flat {
            tasks: lessons
                .into_iter()
                .map(|(id, title, duration, content, feeling)| {
                    task(id, title, duration, content, feeling).with_image(&id.replace('_', ""))
                })
                .collect(),
        },
    )
}

fn physics() -> SubjectData {
    subject(
        SubjectId::Physics,
        "الفيزياء",
        "rose",
        "الحث الكهرومغناطيسي والتيار المتردد.",
        530,
        SubjectTasks::Sectioned {
            sections: vec![
                section(
                    "الفصل الثالث",
                    vec![
                        task("phys_3_1", "قانون فاراداي", "30 دقيقة", "القاعدة والقانون", "بداية الحث"),
                        task("phys_3_2", "حل على فاراداي", "25 دقيقة", "مسائل وتطبيقات", "الفهم العميق"),
                        task("phys_3_3", "الحث الذاتي والمتبادل", "30 دقيقة", "التجارب والقوانين", "الربط بين الملفات"),
                        task("phys_3_4", "حل على الحث", "25 دقيقة", "مسائل بيانية", "تحليل الرسوم"),
                        task("phys_3_5", "ق د ك سلك مستقيم", "20 دقيقة", "القوة الدافعة في سلك", "فهم الحركة"),
                        task("phys_3_6", "حل على السلك", "20 دقيقة", "قاعدة فليمنج", "تحديد الاتجاهات"),
                        task("phys_3_7", "الأجهزة", "30 دقيقة", "الدينامو – المحرك – المحول", "تطبيقات الحياة"),
                        task("phys_3_8", "حل على الأجهزة", "25 دقيقة", "مسائل متنوعة", "ختام الفصل"),
                    ],
                ),
                section(
                    "الفصل الرابع",
                    vec![task("phys_4_1", "مراجعة الفصل الرابع", "أسبوع قادم", "دوائر التيار المتردد", "الاستعداد")],
                ),
            ],
        },
    )
}

fn math() -> SubjectData {
    let lessons = [
        ("math_1", "الدوال والمتباينات", "30 دقيقة", "تزايد وتناقص الدوال", "رؤية الدالة"),
        ("math_2", "قراءة المنحنيات", "25 دقيقة", "استخراج المعلومات من الرسم", "قوة الملاحظة"),
        ("math_3", "النقط الحرجة والانقلاب", "30 دقيقة", "شروط وجود النقط", "تحليل السلوك"),
        ("math_4", "قراءة منحنيات (تطبيقي)", "25 دقيقة", "مسائل مركبة", "الربط بين المشتقات"),
        ("math_5", "حل سنين سابقة", "40 دقيقة", "الباب الثاني تفاضل", "الثقة في الامتحان"),
    ];
    subject(
        SubjectId::Math,
        "الرياضيات (تفاضل)",
        "orange",
        "سلوك الدوال ورسم المنحنيات.",
        20,
        SubjectTasks::Flat {
            tasks: lessons
                .into_iter()
                .map(|(id, title, duration, content, feeling)| {
                    task(id, title, duration, content, feeling).with_image(&id.replace('_', ""))
                })
                .collect(),
        },
    )
}
