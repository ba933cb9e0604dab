//! Static NEET curriculum: subjects and their chapters in syllabus order.
//!
//! The curriculum is reference data. Per-user progress on a chapter (NCERT read,
//! lecture watched, practice done, revisions) lives in the `chapter_progress`
//! table and is overlaid by [`crate::libs::checklist::Checklist`].

use serde::{Deserialize, Serialize};

/// A chapter together with the learner's progress on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub is_ncert_read: bool,
    pub is_video_watched: bool,
    pub is_practice_done: bool,
    pub revision_count: u32,
}

impl Chapter {
    pub fn new(id: &str, name: &str) -> Self {
        Chapter {
            id: id.to_string(),
            name: name.to_string(),
            is_ncert_read: false,
            is_video_watched: false,
            is_practice_done: false,
            revision_count: 0,
        }
    }

    /// All three study activities are done.
    pub fn is_complete(&self) -> bool {
        self.is_ncert_read && self.is_video_watched && self.is_practice_done
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Color label carried with the syllabus data, e.g. `blue`.
    pub color_tag: String,
    pub chapters: Vec<Chapter>,
}

impl Subject {
    pub fn new(id: &str, name: &str, color_tag: &str, chapters: Vec<Chapter>) -> Self {
        Subject {
            id: id.to_string(),
            name: name.to_string(),
            color_tag: color_tag.to_string(),
            chapters,
        }
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }
}

/// Source of the ordered subject list that drives plan generation.
pub trait CurriculumProvider {
    fn subjects(&self) -> &[Subject];

    fn total_chapters(&self) -> usize {
        self.subjects().iter().map(|s| s.chapters.len()).sum()
    }

    fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects().iter().find(|s| s.id == subject_id)
    }

    fn chapter_name(&self, subject_id: &str, chapter_id: &str) -> Option<&str> {
        self.subject(subject_id)
            .and_then(|s| s.chapter(chapter_id))
            .map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curriculum {
    subjects: Vec<Subject>,
}

impl Curriculum {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Curriculum { subjects }
    }

    /// The full NEET syllabus: physics, chemistry and biology.
    pub fn neet() -> Self {
        let build = |id: &str, name: &str, color: &str, chapters: &[(&str, &str)]| {
            Subject::new(id, name, color, chapters.iter().map(|(cid, cname)| Chapter::new(cid, cname)).collect())
        };

        Curriculum::new(vec![
            build("physics", "Physics", "blue", PHYSICS),
            build("chemistry", "Chemistry", "purple", CHEMISTRY),
            build("biology", "Biology", "green", BIOLOGY),
        ])
    }

    pub fn subjects_mut(&mut self) -> &mut [Subject] {
        &mut self.subjects
    }
}

impl CurriculumProvider for Curriculum {
    fn subjects(&self) -> &[Subject] {
        &self.subjects
    }
}

const PHYSICS: &[(&str, &str)] = &[
    ("p1", "Physical World and Measurement"),
    ("p2", "Kinematics"),
    ("p3", "Laws of Motion"),
    ("p4", "Work, Energy and Power"),
    ("p5", "Motion of System of Particles and Rigid Body"),
    ("p6", "Gravitation"),
    ("p7", "Properties of Bulk Matter"),
    ("p8", "Thermodynamics"),
    ("p9", "Behaviour of Perfect Gas and Kinetic Theory"),
    ("p10", "Oscillations and Waves"),
    ("p11", "Electrostatics"),
    ("p12", "Current Electricity"),
    ("p13", "Magnetic Effects of Current and Magnetism"),
    ("p14", "Electromagnetic Induction and Alternating Currents"),
    ("p15", "Electromagnetic Waves"),
    ("p16", "Optics"),
    ("p17", "Dual Nature of Matter and Radiation"),
    ("p18", "Atoms and Nuclei"),
    ("p19", "Electronic Devices"),
    ("p20", "Communication Systems"),
];

const CHEMISTRY: &[(&str, &str)] = &[
    ("c1", "Some Basic Concepts of Chemistry"),
    ("c2", "Structure of Atom"),
    ("c3", "Classification of Elements and Periodicity"),
    ("c4", "Chemical Bonding and Molecular Structure"),
    ("c5", "States of Matter"),
    ("c6", "Thermodynamics"),
    ("c7", "Equilibrium"),
    ("c8", "Redox Reactions"),
    ("c9", "Hydrogen"),
    ("c10", "s-Block Elements"),
    ("c11", "p-Block Elements"),
    ("c12", "Organic Chemistry: Basic Principles"),
    ("c13", "Hydrocarbons"),
    ("c14", "Environmental Chemistry"),
    ("c15", "Solid State"),
    ("c16", "Solutions"),
    ("c17", "Electrochemistry"),
    ("c18", "Chemical Kinetics"),
    ("c19", "Surface Chemistry"),
    ("c20", "d and f Block Elements"),
    ("c21", "Coordination Compounds"),
    ("c22", "Haloalkanes and Haloarenes"),
    ("c23", "Alcohols, Phenols and Ethers"),
    ("c24", "Aldehydes, Ketones and Carboxylic Acids"),
    ("c25", "Organic Compounds Containing Nitrogen"),
    ("c26", "Biomolecules"),
    ("c27", "Polymers"),
    ("c28", "Chemistry in Everyday Life"),
];

const BIOLOGY: &[(&str, &str)] = &[
    ("b1", "The Living World"),
    ("b2", "Biological Classification"),
    ("b3", "Plant Kingdom"),
    ("b4", "Animal Kingdom"),
    ("b5", "Morphology of Flowering Plants"),
    ("b6", "Anatomy of Flowering Plants"),
    ("b7", "Structural Organisation in Animals"),
    ("b8", "Cell: The Unit of Life"),
    ("b9", "Biomolecules"),
    ("b10", "Cell Cycle and Cell Division"),
    ("b11", "Transport in Plants"),
    ("b12", "Mineral Nutrition"),
    ("b13", "Photosynthesis in Higher Plants"),
    ("b14", "Respiration in Plants"),
    ("b15", "Plant Growth and Development"),
    ("b16", "Digestion and Absorption"),
    ("b17", "Breathing and Exchange of Gases"),
    ("b18", "Body Fluids and Circulation"),
    ("b19", "Excretory Products and their Elimination"),
    ("b20", "Locomotion and Movement"),
    ("b21", "Neural Control and Coordination"),
    ("b22", "Chemical Coordination and Integration"),
    ("b23", "Reproduction in Organisms"),
    ("b24", "Sexual Reproduction in Flowering Plants"),
    ("b25", "Human Reproduction"),
    ("b26", "Reproductive Health"),
    ("b27", "Principles of Inheritance and Variation"),
    ("b28", "Molecular Basis of Inheritance"),
    ("b29", "Evolution"),
    ("b30", "Human Health and Disease"),
    ("b31", "Strategies for Enhancement in Food Production"),
    ("b32", "Microbes in Human Welfare"),
    ("b33", "Biotechnology: Principles and Processes"),
    ("b34", "Biotechnology and its Applications"),
    ("b35", "Organisms and Population"),
    ("b36", "Ecosystem"),
    ("b37", "Biodiversity and Conservation"),
    ("b38", "Environmental Issues"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neet_curriculum_shape() {
        let curriculum = Curriculum::neet();
        let ids: Vec<&str> = curriculum.subjects().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["physics", "chemistry", "biology"]);
        assert_eq!(curriculum.total_chapters(), 20 + 28 + 38);
    }

    #[test]
    fn test_chapter_lookup() {
        let curriculum = Curriculum::neet();
        assert_eq!(curriculum.chapter_name("chemistry", "c7"), Some("Equilibrium"));
        assert_eq!(curriculum.chapter_name("chemistry", "p7"), None);
        assert!(curriculum.subject("maths").is_none());
    }

    #[test]
    fn test_new_chapter_is_not_complete() {
        let mut chapter = Chapter::new("p1", "Physical World and Measurement");
        assert!(!chapter.is_complete());
        chapter.is_ncert_read = true;
        chapter.is_video_watched = true;
        chapter.is_practice_done = true;
        assert!(chapter.is_complete());
    }
}
