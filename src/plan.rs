//! The generated PgMP study plan: topic table and 68-day task catalog.
//!
//! `generate` is a pure function of the calendar configuration; the catalog
//! itself is static data and every run produces the identical sequence.

use crate::calendar::Calendar;
use crate::models::{Priority, StudyTask, Topic, TopicCategory};

struct TopicSpec {
    id: &'static str,
    name: &'static str,
    category: TopicCategory,
    color: &'static str,
    icon: &'static str,
}

const TOPICS: &[TopicSpec] = &[
    TopicSpec { id: "principles", name: "Program Management Principles", category: TopicCategory::Principles, color: "#3b82f6", icon: "BookOpen" },
    TopicSpec { id: "stakeholders", name: "Stakeholder Principle", category: TopicCategory::Principles, color: "#10b981", icon: "Users" },
    TopicSpec { id: "benefits", name: "Benefits Realization", category: TopicCategory::Principles, color: "#f59e0b", icon: "Target" },
    TopicSpec { id: "synergy", name: "Synergy Principle", category: TopicCategory::Principles, color: "#8b5cf6", icon: "Zap" },
    TopicSpec { id: "team", name: "Team of Teams", category: TopicCategory::Principles, color: "#ec4899", icon: "UsersRound" },
    TopicSpec { id: "change", name: "Change Management", category: TopicCategory::Principles, color: "#ef4444", icon: "RefreshCcw" },
    TopicSpec { id: "leadership", name: "Leadership Principle", category: TopicCategory::Principles, color: "#06b6d4", icon: "Crown" },
    TopicSpec { id: "risk", name: "Risk Management", category: TopicCategory::Principles, color: "#f97316", icon: "AlertTriangle" },
    TopicSpec { id: "governance", name: "Governance Principle", category: TopicCategory::Principles, color: "#84cc16", icon: "Scale" },
    TopicSpec { id: "strategic", name: "Strategic Alignment Domain", category: TopicCategory::Domains, color: "#6366f1", icon: "Compass" },
    TopicSpec { id: "benefits-domain", name: "Benefits Management Domain", category: TopicCategory::Domains, color: "#14b8a6", icon: "TrendingUp" },
    TopicSpec { id: "stakeholder-domain", name: "Stakeholder Engagement Domain", category: TopicCategory::Domains, color: "#a855f7", icon: "MessageCircle" },
    TopicSpec { id: "governance-domain", name: "Governance Framework Domain", category: TopicCategory::Domains, color: "#f43f5e", icon: "Shield" },
    TopicSpec { id: "collaboration", name: "Collaboration Domain", category: TopicCategory::Domains, color: "#0ea5e9", icon: "Handshake" },
    TopicSpec { id: "lifecycle", name: "Life Cycle Management Domain", category: TopicCategory::Domains, color: "#22c55e", icon: "Repeat" },
    TopicSpec { id: "definition", name: "Definition Phase", category: TopicCategory::Lifecycle, color: "#eab308", icon: "FileText" },
    TopicSpec { id: "delivery", name: "Delivery Phase", category: TopicCategory::Lifecycle, color: "#3b82f6", icon: "Rocket" },
    TopicSpec { id: "closure", name: "Closure Phase", category: TopicCategory::Lifecycle, color: "#64748b", icon: "CheckCircle" },
    TopicSpec { id: "business-case", name: "Business Case", category: TopicCategory::Documents, color: "#f59e0b", icon: "Briefcase" },
    TopicSpec { id: "charter", name: "Program Charter", category: TopicCategory::Documents, color: "#10b981", icon: "FileSignature" },
    TopicSpec { id: "roadmap", name: "Program Roadmap", category: TopicCategory::Documents, color: "#8b5cf6", icon: "Map" },
    TopicSpec { id: "plan", name: "Program Management Plan", category: TopicCategory::Documents, color: "#ef4444", icon: "ClipboardList" },
    TopicSpec { id: "practice", name: "Practice Exams", category: TopicCategory::Practice, color: "#06b6d4", icon: "GraduationCap" },
];

struct TaskSpec {
    day: u32,
    title: &'static str,
    topic: &'static str,
    minutes: u32,
    priority: Priority,
    desc: &'static str,
    points: [&'static str; 3],
}

const RESOURCES: &[&str] = &[
    "PMI Standard for Program Management 5th Ed",
    "PgMP Examination Content Outline",
];

const SCHEDULE: &[TaskSpec] = &[
    // Week 1: foundation and principles
    TaskSpec { day: 1, title: "Introduction to Program Management", topic: "principles", minutes: 90, priority: Priority::High, desc: "Overview of program management, key concepts, and PMI framework", points: ["Program vs Project vs Portfolio", "Program management value proposition", "PMI standards overview"] },
    TaskSpec { day: 2, title: "Stakeholder Principle Deep Dive", topic: "stakeholders", minutes: 120, priority: Priority::High, desc: "Understanding stakeholder identification, analysis, and engagement strategies", points: ["Stakeholder identification techniques", "Power/interest grid", "Engagement approaches"] },
    TaskSpec { day: 3, title: "Benefits Realization Principle", topic: "benefits", minutes: 120, priority: Priority::High, desc: "Learn how to define, measure, and sustain program benefits", points: ["Benefits identification", "Benefits measurement", "Benefits sustainment"] },
    TaskSpec { day: 4, title: "Weekend Review: Principles 1-3", topic: "principles", minutes: 180, priority: Priority::High, desc: "Comprehensive review and practice questions for first three principles", points: ["Review key concepts", "Practice scenarios", "Memory techniques"] },
    TaskSpec { day: 5, title: "Synergy Principle", topic: "synergy", minutes: 120, priority: Priority::High, desc: "Understanding how to create value through component interdependencies", points: ["Component synergy", "Resource optimization", "Interdependency management"] },
    TaskSpec { day: 6, title: "Team of Teams Principle", topic: "team", minutes: 120, priority: Priority::High, desc: "Building and leading effective program teams", points: ["Team structure", "Communication protocols", "Conflict resolution"] },
    TaskSpec { day: 7, title: "Weekend Deep Dive: Team Dynamics", topic: "team", minutes: 180, priority: Priority::Medium, desc: "Extended study on team leadership and collaboration", points: ["Leadership styles", "Team motivation", "Performance management"] },
    // Week 2: remaining principles
    TaskSpec { day: 8, title: "Change Management Principle", topic: "change", minutes: 120, priority: Priority::High, desc: "Managing organizational change through programs", points: ["Change models", "Resistance management", "Change adoption"] },
    TaskSpec { day: 9, title: "Leadership Principle", topic: "leadership", minutes: 120, priority: Priority::High, desc: "Program manager as transformational leader", points: ["Leadership competencies", "Influence strategies", "Vision communication"] },
    TaskSpec { day: 10, title: "Risk Management Principle", topic: "risk", minutes: 120, priority: Priority::High, desc: "Program-level risk identification and response", points: ["Risk identification", "Risk analysis", "Risk response strategies"] },
    TaskSpec { day: 11, title: "Weekend Review: All Principles", topic: "principles", minutes: 240, priority: Priority::High, desc: "Complete review of all 8 program management principles", points: ["Cross-principle connections", "Practice questions", "Key memorization"] },
    TaskSpec { day: 12, title: "Governance Principle", topic: "governance", minutes: 120, priority: Priority::High, desc: "Establishing effective program governance structures", points: ["Governance structures", "Decision frameworks", "Accountability mechanisms"] },
    TaskSpec { day: 13, title: "Principles Integration Exercise", topic: "principles", minutes: 150, priority: Priority::Medium, desc: "How principles work together in real scenarios", points: ["Case study analysis", "Integration patterns", "Best practices"] },
    TaskSpec { day: 14, title: "Weekend Practice: Principles Exam", topic: "practice", minutes: 180, priority: Priority::High, desc: "Practice exam focusing on principles domain", points: ["Timed practice", "Answer analysis", "Weak area identification"] },
    // Week 3: performance domains begin
    TaskSpec { day: 15, title: "Strategic Alignment Domain", topic: "strategic", minutes: 120, priority: Priority::High, desc: "Aligning programs with organizational strategy", points: ["Strategic planning", "Program selection criteria", "Strategic fit assessment"] },
    TaskSpec { day: 16, title: "Strategic Alignment Deep Dive", topic: "strategic", minutes: 120, priority: Priority::High, desc: "Advanced strategic alignment concepts", points: ["Portfolio alignment", "Strategic objectives", "Value delivery"] },
    TaskSpec { day: 17, title: "Benefits Management Domain Intro", topic: "benefits-domain", minutes: 120, priority: Priority::High, desc: "Introduction to benefits management domain", points: ["Benefits lifecycle", "Benefits mapping", "Benefits tracking"] },
    TaskSpec { day: 18, title: "Weekend: Benefits Domain Mastery", topic: "benefits-domain", minutes: 240, priority: Priority::High, desc: "Comprehensive study of benefits management", points: ["Benefits identification", "Benefits analysis", "Benefits realization"] },
    TaskSpec { day: 19, title: "Stakeholder Engagement Domain", topic: "stakeholder-domain", minutes: 120, priority: Priority::High, desc: "Domain-specific stakeholder engagement techniques", points: ["Stakeholder analysis", "Engagement planning", "Communication strategies"] },
    TaskSpec { day: 20, title: "Stakeholder Engagement Practice", topic: "stakeholder-domain", minutes: 120, priority: Priority::Medium, desc: "Practical stakeholder scenarios", points: ["Stakeholder mapping", "Engagement techniques", "Conflict management"] },
    TaskSpec { day: 21, title: "Weekend Review: Domains 1-3", topic: "practice", minutes: 180, priority: Priority::High, desc: "Review and practice for first three domains", points: ["Domain integration", "Practice questions", "Key concepts review"] },
    // Week 4: more domains
    TaskSpec { day: 22, title: "Governance Framework Domain", topic: "governance-domain", minutes: 120, priority: Priority::High, desc: "Building effective governance frameworks", points: ["Governance boards", "Stage gates", "Decision rights"] },
    TaskSpec { day: 23, title: "Governance Deep Dive", topic: "governance-domain", minutes: 120, priority: Priority::High, desc: "Advanced governance concepts and practices", points: ["Governance audits", "Compliance management", "Escalation procedures"] },
    TaskSpec { day: 24, title: "Collaboration Domain", topic: "collaboration", minutes: 120, priority: Priority::High, desc: "Fostering collaboration across program components", points: ["Collaboration tools", "Knowledge sharing", "Team dynamics"] },
    TaskSpec { day: 25, title: "Weekend: Governance & Collaboration", topic: "practice", minutes: 240, priority: Priority::High, desc: "Intensive review of governance and collaboration", points: ["Domain integration", "Case studies", "Practice questions"] },
    TaskSpec { day: 26, title: "Life Cycle Management Domain", topic: "lifecycle", minutes: 120, priority: Priority::High, desc: "Overview of program life cycle management", points: ["Life cycle phases", "Phase transitions", "Iterative management"] },
    TaskSpec { day: 27, title: "Life Cycle Phase Details", topic: "lifecycle", minutes: 120, priority: Priority::Medium, desc: "Detailed study of life cycle phases", points: ["Phase activities", "Key deliverables", "Success criteria"] },
    TaskSpec { day: 28, title: "Weekend Practice: All Domains", topic: "practice", minutes: 180, priority: Priority::High, desc: "Comprehensive practice for all 6 domains", points: ["Timed practice", "Domain weighting", "Weak area focus"] },
    // Week 5: life cycle phases
    TaskSpec { day: 29, title: "Definition Phase Overview", topic: "definition", minutes: 120, priority: Priority::High, desc: "Understanding the program definition phase", points: ["Phase objectives", "Key activities", "Deliverables"] },
    TaskSpec { day: 30, title: "Business Case Development", topic: "business-case", minutes: 120, priority: Priority::High, desc: "Creating compelling business cases for programs", points: ["Business case elements", "Financial analysis", "Benefit projections"] },
    TaskSpec { day: 31, title: "Program Charter Creation", topic: "charter", minutes: 120, priority: Priority::High, desc: "Developing effective program charters", points: ["Charter components", "Authorization process", "Stakeholder approval"] },
    TaskSpec { day: 32, title: "Weekend: Definition Phase Mastery", topic: "definition", minutes: 240, priority: Priority::High, desc: "Deep dive into definition phase", points: ["Phase activities", "Key deliverables", "Success criteria"] },
    TaskSpec { day: 33, title: "Delivery Phase Overview", topic: "delivery", minutes: 120, priority: Priority::High, desc: "Understanding the program delivery phase", points: ["Phase objectives", "Component management", "Progress monitoring"] },
    TaskSpec { day: 34, title: "Program Roadmap Development", topic: "roadmap", minutes: 120, priority: Priority::High, desc: "Creating and maintaining program roadmaps", points: ["Roadmap elements", "Milestone planning", "Dependency visualization"] },
    TaskSpec { day: 35, title: "Weekend: Delivery Phase Practice", topic: "delivery", minutes: 180, priority: Priority::High, desc: "Practice scenarios for delivery phase", points: ["Case studies", "Decision making", "Problem solving"] },
    // Week 6: life cycle and documents
    TaskSpec { day: 36, title: "Program Management Plan", topic: "plan", minutes: 120, priority: Priority::High, desc: "Developing comprehensive program management plans", points: ["Plan components", "Subsidiary plans", "Plan integration"] },
    TaskSpec { day: 37, title: "Delivery Phase Deep Dive", topic: "delivery", minutes: 120, priority: Priority::High, desc: "Advanced delivery phase concepts", points: ["Component coordination", "Issue management", "Change control"] },
    TaskSpec { day: 38, title: "Closure Phase Overview", topic: "closure", minutes: 120, priority: Priority::High, desc: "Understanding program closure", points: ["Closure criteria", "Transition planning", "Lessons learned"] },
    TaskSpec { day: 39, title: "Weekend: Documents Integration", topic: "practice", minutes: 240, priority: Priority::High, desc: "Integration of all key program documents", points: ["Document relationships", "Template usage", "Best practices"] },
    TaskSpec { day: 40, title: "Closure Phase Deep Dive", topic: "closure", minutes: 120, priority: Priority::High, desc: "Detailed closure activities and processes", points: ["Benefit sustainment", "Resource release", "Knowledge transfer"] },
    TaskSpec { day: 41, title: "Document Templates Review", topic: "plan", minutes: 120, priority: Priority::Medium, desc: "Review of key document templates and structures", points: ["Charter template", "Plan structure", "Report formats"] },
    TaskSpec { day: 42, title: "Weekend: Full Life Cycle Review", topic: "lifecycle", minutes: 180, priority: Priority::High, desc: "Complete review of program life cycle", points: ["Phase transitions", "Key decisions", "Critical success factors"] },
    // Week 7: integration and practice
    TaskSpec { day: 43, title: "Cross-Domain Integration", topic: "practice", minutes: 120, priority: Priority::High, desc: "How domains interact and support each other", points: ["Domain relationships", "Integration points", "Synergy creation"] },
    TaskSpec { day: 44, title: "Principles & Domains Integration", topic: "practice", minutes: 120, priority: Priority::High, desc: "Connecting principles with performance domains", points: ["Principle application", "Domain alignment", "Real-world scenarios"] },
    TaskSpec { day: 45, title: "Full Practice Exam 1", topic: "practice", minutes: 240, priority: Priority::High, desc: "First full-length practice exam", points: ["Time management", "Question analysis", "Score tracking"] },
    TaskSpec { day: 46, title: "Weekend: Exam Analysis & Review", topic: "practice", minutes: 240, priority: Priority::High, desc: "Detailed analysis of practice exam results", points: ["Wrong answer review", "Knowledge gaps", "Study adjustments"] },
    TaskSpec { day: 47, title: "Weak Areas Focus Session", topic: "practice", minutes: 150, priority: Priority::High, desc: "Targeted study on identified weak areas", points: ["Personalized review", "Additional practice", "Concept reinforcement"] },
    TaskSpec { day: 48, title: "Scenario-Based Practice", topic: "practice", minutes: 120, priority: Priority::Medium, desc: "Complex scenario-based questions", points: ["Situation analysis", "Decision making", "Best practices"] },
    TaskSpec { day: 49, title: "Weekend: Intensive Review", topic: "practice", minutes: 240, priority: Priority::High, desc: "Comprehensive weekend review session", points: ["All topics review", "Memory reinforcement", "Confidence building"] },
    // Week 8: practice and refinement
    TaskSpec { day: 50, title: "Full Practice Exam 2", topic: "practice", minutes: 240, priority: Priority::High, desc: "Second full-length practice exam", points: ["Progress measurement", "Endurance building", "Time management"] },
    TaskSpec { day: 51, title: "Exam Results Analysis", topic: "practice", minutes: 120, priority: Priority::High, desc: "Detailed analysis of second practice exam", points: ["Trend analysis", "Improvement areas", "Study refinement"] },
    TaskSpec { day: 52, title: "Key Concepts Memorization", topic: "practice", minutes: 120, priority: Priority::Medium, desc: "Final memorization of key concepts and terms", points: ["Key definitions", "Process flows", "Critical formulas"] },
    TaskSpec { day: 53, title: "Weekend: Mock Exam Conditions", topic: "practice", minutes: 270, priority: Priority::High, desc: "Practice under actual exam conditions", points: ["Real timing", "No breaks simulation", "Full focus"] },
    TaskSpec { day: 54, title: "Final Weak Area Review", topic: "practice", minutes: 150, priority: Priority::High, desc: "Last focused review on remaining weak areas", points: ["Targeted study", "Quick wins", "Confidence boost"] },
    TaskSpec { day: 55, title: "Exam Strategies & Tips", topic: "practice", minutes: 90, priority: Priority::Medium, desc: "Test-taking strategies and exam tips", points: ["Question analysis", "Elimination techniques", "Time allocation"] },
    TaskSpec { day: 56, title: "Weekend: Final Comprehensive Review", topic: "practice", minutes: 240, priority: Priority::High, desc: "Last major review before final week", points: ["All topics summary", "Quick reference", "Mental preparation"] },
    // Week 9: final preparation
    TaskSpec { day: 57, title: "Full Practice Exam 3", topic: "practice", minutes: 240, priority: Priority::High, desc: "Third full-length practice exam", points: ["Performance tracking", "Stamina testing", "Final assessment"] },
    TaskSpec { day: 58, title: "Light Review & Rest", topic: "practice", minutes: 60, priority: Priority::Low, desc: "Light review session, avoid burnout", points: ["Light reading", "Concept browsing", "Mental rest"] },
    TaskSpec { day: 59, title: "Quick Reference Review", topic: "practice", minutes: 90, priority: Priority::Medium, desc: "Review quick reference materials", points: ["Key points", "Cheat sheets", "Summary notes"] },
    TaskSpec { day: 60, title: "Weekend: Confidence Building", topic: "practice", minutes: 180, priority: Priority::High, desc: "Focus on strengths and confidence building", points: ["Strong areas review", "Positive reinforcement", "Visualization"] },
    TaskSpec { day: 61, title: "Final Light Practice", topic: "practice", minutes: 60, priority: Priority::Low, desc: "Short practice session, stay sharp", points: ["Quick questions", "Mental activation", "Focus maintenance"] },
    TaskSpec { day: 62, title: "Logistics & Mental Prep", topic: "practice", minutes: 30, priority: Priority::Medium, desc: "Prepare logistics and mental state", points: ["Exam day planning", "Relaxation techniques", "Sleep schedule"] },
    TaskSpec { day: 63, title: "Final Review & Relaxation", topic: "practice", minutes: 45, priority: Priority::Low, desc: "Very light review, focus on relaxation", points: ["Brief overview", "Deep breathing", "Positive mindset"] },
    // Final days
    TaskSpec { day: 64, title: "Day Before - Light Review", topic: "practice", minutes: 30, priority: Priority::Low, desc: "Very light review, no heavy study", points: ["Brief notes review", "Stay calm", "Early sleep prep"] },
    TaskSpec { day: 65, title: "Day Before - Rest & Prepare", topic: "practice", minutes: 15, priority: Priority::Low, desc: "Rest day, prepare exam logistics", points: ["Documents ready", "Route planned", "Relax"] },
    TaskSpec { day: 66, title: "Light Mental Activation", topic: "practice", minutes: 20, priority: Priority::Low, desc: "Keep mind active without stress", points: ["Light reading", "Stay positive", "Trust preparation"] },
    TaskSpec { day: 67, title: "Final Relaxation", topic: "practice", minutes: 0, priority: Priority::Low, desc: "Complete rest, no study", points: ["Full relaxation", "Good sleep", "Confidence"] },
    TaskSpec { day: 68, title: "EXAM DAY - You're Ready!", topic: "practice", minutes: 0, priority: Priority::High, desc: "Your PgMP exam is today at 9:30 AM Dubai!", points: ["Stay confident", "Trust your prep", "You've got this!"] },
];

/// The full topic table in display order
pub fn topics() -> Vec<Topic> {
    TOPICS.iter().map(build_topic).collect()
}

fn build_topic(spec: &TopicSpec) -> Topic {
    Topic {
        id: spec.id.to_string(),
        name: spec.name.to_string(),
        category: spec.category,
        color: spec.color.to_string(),
        icon: spec.icon.to_string(),
    }
}

/// Generate the study catalog for a calendar. Deterministic: task ids are
/// `task-1 ..` in schedule order and weekend flags follow the calendar's
/// configured weekend set.
pub fn generate(calendar: &Calendar) -> Vec<StudyTask> {
    SCHEDULE
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let topic = TOPICS
                .iter()
                .find(|t| t.id == spec.topic)
                .unwrap_or(&TOPICS[0]);

            StudyTask {
                id: format!("task-{}", index + 1),
                title: spec.title.to_string(),
                description: spec.desc.to_string(),
                duration: spec.minutes,
                topic: build_topic(topic),
                day: spec.day,
                is_weekend: calendar.is_weekend(spec.day),
                priority: spec.priority,
                resources: RESOURCES.iter().map(|r| r.to_string()).collect(),
                key_points: spec.points.iter().map(|p| p.to_string()).collect(),
            }
        })
        .collect()
}
