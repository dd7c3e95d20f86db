//! The 12-month curriculum

use serde::Serialize;

/// One monthly module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub month: u8,
    pub theme: &'static str,
    pub outcomes: &'static str,
    pub practices: &'static [&'static str],
    pub weekly_content: [WeeklyUnit; 4],
    pub assets: Assets,
}

/// One week inside a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyUnit {
    pub week: u8,
    pub title: &'static str,
    pub practice: &'static str,
    pub reflection: &'static str,
}

/// Optional media shipped with a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Assets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<&'static str>,
}

impl Assets {
    const NONE: Assets = Assets {
        video: None,
        audio: None,
        pdf: None,
    };

    const fn audio(path: &'static str) -> Self {
        Assets {
            audio: Some(path),
            ..Self::NONE
        }
    }

    const fn pdf(path: &'static str) -> Self {
        Assets {
            pdf: Some(path),
            ..Self::NONE
        }
    }

    /// Asset links as (kind, path) pairs
    pub fn links(&self) -> Vec<(&'static str, &'static str)> {
        [("video", self.video), ("audio", self.audio), ("pdf", self.pdf)]
            .into_iter()
            .filter_map(|(kind, path)| path.map(|p| (kind, p)))
            .collect()
    }
}

const fn week(
    week: u8,
    title: &'static str,
    practice: &'static str,
    reflection: &'static str,
) -> WeeklyUnit {
    WeeklyUnit {
        week,
        title,
        practice,
        reflection,
    }
}

/// Every module, ordered by month
pub static MODULES: [Module; 12] = [
    Module {
        month: 1,
        theme: "Embrace Mortality",
        outcomes: "Name fears; set intentions",
        practices: &["Death-awareness meditation", "Intention contract", "Daily reflection"],
        weekly_content: [
            week(1, "Facing the Truth", "5-minute mortality meditation", "If this were your last year, what would matter most today?"),
            week(2, "Naming Fears", "Write three fears about death", "Which fear holds the most power over your choices?"),
            week(3, "Setting Intentions", "Create your year intention statement", "How does mortality awareness shape your intention?"),
            week(4, "Living the Intention", "Daily intention reminder practice", "What shifted when you remembered your intention today?"),
        ],
        assets: Assets {
            video: Some("/videos/month1-intro.mp4"),
            audio: None,
            pdf: Some("/pdfs/month1-workbook.pdf"),
        },
    },
    Module {
        month: 2,
        theme: "Live the Present",
        outcomes: "Develop presence habits",
        practices: &["Breath timer", "Mindful micro-practices", "Present moment anchors"],
        weekly_content: [
            week(1, "Breath as Anchor", "Three conscious breaths, three times daily", "When did breathing bring you back to now?"),
            week(2, "Micro-Mindfulness", "30-second presence pauses", "What did you notice in your pause today?"),
            week(3, "Sensory Awareness", "Five senses check-in", "Which sense awakened you most?"),
            week(4, "Present Living", "Full presence in one daily activity", "How did presence change this ordinary moment?"),
        ],
        assets: Assets::audio("/audio/breath-timer.mp3"),
    },
    Module {
        month: 3,
        theme: "Letting Go",
        outcomes: "Declutter life",
        practices: &["10-item release", "Values audit", "Space clearing"],
        weekly_content: [
            week(1, "Physical Release", "Release 10 physical items", "What resistance did you notice while letting go?"),
            week(2, "Digital Declutter", "Clear digital spaces", "How does digital simplicity feel?"),
            week(3, "Relationship Audit", "Evaluate energy exchanges", "Which relationships drain vs. nourish?"),
            week(4, "Values Alignment", "Align life with top 3 values", "What no longer serves your values?"),
        ],
        assets: Assets::pdf("/pdfs/declutter-tracker.pdf"),
    },
    Module {
        month: 4,
        theme: "Forgiveness",
        outcomes: "Reduce resentments",
        practices: &["Forgiveness letters", "Self-forgiveness", "Release ritual"],
        weekly_content: [
            week(1, "Forgiving Others", "Write unsent forgiveness letter", "Name the hurt. Name your needs. Offer release."),
            week(2, "Self-Forgiveness", "Letter to younger self", "What do you need to forgive in yourself?"),
            week(3, "Releasing Resentment", "Resentment inventory and release", "What resentment costs you most energy?"),
            week(4, "Living Forgiveness", "Daily forgiveness practice", "How does forgiveness change your heart?"),
        ],
        assets: Assets::audio("/audio/forgiveness-meditation.mp3"),
    },
    Module {
        month: 5,
        theme: "Relationships",
        outcomes: "Strengthen bonds",
        practices: &["Gratitude notes", "Quality time", "Deep listening"],
        weekly_content: [
            week(1, "Appreciation Practice", "Send 3 gratitude messages", "How did expressing gratitude feel?"),
            week(2, "Quality Presence", "Undistracted time with loved one", "What emerged in full presence?"),
            week(3, "Deep Listening", "Listen without fixing", "What did you hear when you truly listened?"),
            week(4, "Connection Ritual", "Create weekly connection ritual", "How does ritual deepen relationship?"),
        ],
        assets: Assets::pdf("/pdfs/relationship-map.pdf"),
    },
    Module {
        month: 6,
        theme: "Gratitude",
        outcomes: "Savor daily life",
        practices: &["3 gratitudes daily", "Gratitude letter", "Savoring practice"],
        weekly_content: [
            week(1, "Daily Gratitude", "Three specific gratitudes each morning", "Notice one thing you're grateful for right now."),
            week(2, "Gratitude Depth", "Deep dive into one gratitude", "What layers exist in this gratitude?"),
            week(3, "Gratitude Expression", "Express gratitude to someone", "How did sharing gratitude impact you both?"),
            week(4, "Savoring Practice", "Fully savor one moment daily", "What details made this moment precious?"),
        ],
        assets: Assets::audio("/audio/gratitude-meditation.mp3"),
    },
    Module {
        month: 7,
        theme: "Legacy",
        outcomes: "Define impact",
        practices: &["Legacy letters", "Memory recording", "Values transmission"],
        weekly_content: [
            week(1, "Legacy Vision", "Write your legacy statement", "What do you want to leave behind?"),
            week(2, "Letters to Future", "Write letter to loved one", "What wisdom needs sharing?"),
            week(3, "Memory Capture", "Record important memory", "What story must be preserved?"),
            week(4, "Living Legacy", "One legacy action this week", "How are you creating legacy today?"),
        ],
        assets: Assets::pdf("/pdfs/legacy-templates.pdf"),
    },
    Module {
        month: 8,
        theme: "Face Fears",
        outcomes: "Build courage",
        practices: &["Fear inventory", "Exposure ladder", "Courage practice"],
        weekly_content: [
            week(1, "Fear Inventory", "List and rank your fears", "Which fear limits you most?"),
            week(2, "Small Courage", "One small brave action daily", "What happened when you acted despite fear?"),
            week(3, "Fear Conversation", "Dialogue with your fear", "What is fear trying to protect?"),
            week(4, "Courage Celebration", "Acknowledge your courage", "How has facing fear changed you?"),
        ],
        assets: Assets::pdf("/pdfs/fear-ladder.pdf"),
    },
    Module {
        month: 9,
        theme: "Spirituality",
        outcomes: "Connect deeper",
        practices: &["Spiritual inquiry", "Sacred ritual", "Connection practice"],
        weekly_content: [
            week(1, "Spiritual Exploration", "Define spirituality for yourself", "What connects you to something greater?"),
            week(2, "Sacred Practice", "Create personal ritual", "How does ritual feed your spirit?"),
            week(3, "Nature Connection", "Silent time in nature", "What did nature teach you?"),
            week(4, "Spiritual Community", "Connect with spiritual community", "How does shared practice deepen connection?"),
        ],
        assets: Assets::audio("/audio/spiritual-meditation.mp3"),
    },
    Module {
        month: 10,
        theme: "Acceptance",
        outcomes: "Surrender & peace",
        practices: &["RAIN practice", "Acceptance meditation", "Letting be"],
        weekly_content: [
            week(1, "Recognize Resistance", "Notice what you resist", "What are you fighting against?"),
            week(2, "Allow Experience", "RAIN practice daily", "What shifts when you allow?"),
            week(3, "Investigate Kindly", "Explore resistance with compassion", "What does resistance need?"),
            week(4, "Natural Awareness", "Rest in acceptance", "How does acceptance create peace?"),
        ],
        assets: Assets::audio("/audio/rain-meditation.mp3"),
    },
    Module {
        month: 11,
        theme: "Prepare Practically",
        outcomes: "End-of-life basics",
        practices: &["Document wishes", "Name proxies", "Organize affairs"],
        weekly_content: [
            week(1, "Document Wishes", "Write basic wishes", "What feels important to document?"),
            week(2, "Choose Proxies", "Select and inform proxies", "Who can carry your wishes?"),
            week(3, "Organize Affairs", "Create important docs list", "What needs organizing?"),
            week(4, "Share Plans", "Share plans with loved ones", "How does preparation bring peace?"),
        ],
        assets: Assets::pdf("/pdfs/preparation-checklist.pdf"),
    },
    Module {
        month: 12,
        theme: "Live Fully",
        outcomes: "Integrate & celebrate",
        practices: &["Integration review", "Celebration ritual", "Future visioning"],
        weekly_content: [
            week(1, "Year Review", "Review your year journey", "What transformed within you?"),
            week(2, "Integration Practice", "Identify key learnings", "What practices stay with you?"),
            week(3, "Celebration Ritual", "Create celebration ceremony", "How do you honor this journey?"),
            week(4, "Next Year Vision", "Design your next year practice", "How will you continue living fully?"),
        ],
        assets: Assets::pdf("/pdfs/next-year-plan.pdf"),
    },
];

/// Look up a module by program month (1-12)
///
/// Any other month, including values arriving from user input, gives `None`.
pub fn module(month: u32) -> Option<&'static Module> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MODULES.get(index)
}

/// All modules, ordered by month
pub fn modules() -> &'static [Module] {
    &MODULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_are_ordered_by_month() {
        assert_eq!(MODULES.len(), 12);
        for (i, m) in MODULES.iter().enumerate() {
            assert_eq!(m.month as usize, i + 1);
            for (w, unit) in m.weekly_content.iter().enumerate() {
                assert_eq!(unit.week as usize, w + 1);
            }
            assert!(!m.practices.is_empty());
        }
    }

    #[test]
    fn test_module_lookup() {
        assert_eq!(module(1).unwrap().theme, "Embrace Mortality");
        assert_eq!(module(4).unwrap().weekly_content[0].title, "Forgiving Others");
        assert_eq!(module(12).unwrap().theme, "Live Fully");
    }

    #[test]
    fn test_module_lookup_out_of_range() {
        assert!(module(0).is_none());
        assert!(module(13).is_none());
        assert!(module(u32::MAX).is_none());
    }

    #[test]
    fn test_asset_links() {
        let links = module(1).unwrap().assets.links();
        assert_eq!(
            links,
            vec![
                ("video", "/videos/month1-intro.mp4"),
                ("pdf", "/pdfs/month1-workbook.pdf")
            ]
        );
        assert_eq!(module(2).unwrap().assets.links().len(), 1);
    }

    #[test]
    fn test_module_serializes_for_json_output() {
        let json = serde_json::to_value(module(2).unwrap()).unwrap();
        assert_eq!(json["theme"], "Live the Present");
        assert_eq!(json["weeklyContent"][0]["week"], 1);
        assert!(json["assets"].get("pdf").is_none());
    }
}
