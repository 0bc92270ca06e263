//! Vocabulary IRIs used by the store layout

pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

pub mod xsd {
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

pub mod skos {
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
    pub const CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
    pub const IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
    pub const NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";
    pub const RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";
    pub const BROAD_MATCH: &str = "http://www.w3.org/2004/02/skos/core#broadMatch";
    pub const NARROW_MATCH: &str = "http://www.w3.org/2004/02/skos/core#narrowMatch";
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
    pub const CLOSE_MATCH: &str = "http://www.w3.org/2004/02/skos/core#closeMatch";
    pub const RELATED_MATCH: &str = "http://www.w3.org/2004/02/skos/core#relatedMatch";
}

/// Application ontology
pub mod model {
    pub const VOCABULARY: &str = "https://w3id.org/termgraph/model#Vocabulary";
    pub const HAS_GLOSSARY: &str = "https://w3id.org/termgraph/model#hasGlossary";
    pub const DESCRIBES_DOCUMENT: &str = "https://w3id.org/termgraph/model#describesDocument";
    pub const IMPORTS_VOCABULARY: &str = "https://w3id.org/termgraph/model#importsVocabulary";
    pub const PRIMARY_LANGUAGE: &str = "https://w3id.org/termgraph/model#primaryLanguage";

    pub const DERIVED_FROM: &str = "https://w3id.org/termgraph/model#derivedFrom";

    pub const VOCABULARY_SNAPSHOT: &str = "https://w3id.org/termgraph/model#VocabularySnapshot";
    pub const TERM_SNAPSHOT: &str = "https://w3id.org/termgraph/model#TermSnapshot";
    pub const VERSION_OF: &str = "https://w3id.org/termgraph/model#versionOf";
    pub const CREATED: &str = "https://w3id.org/termgraph/model#created";

    pub const WORKSPACE: &str = "https://w3id.org/termgraph/model#Workspace";
    pub const REFERENCES_CONTEXT: &str = "https://w3id.org/termgraph/model#referencesContext";
    pub const BASED_ON_VOCABULARY: &str = "https://w3id.org/termgraph/model#basedOnVocabulary";
    pub const HAS_CHANGE_TRACKING_CONTEXT: &str =
        "https://w3id.org/termgraph/model#hasChangeTrackingContext";

    pub const TERM_LINK: &str = "https://w3id.org/termgraph/model#TermLink";
    pub const LINK_SOURCE: &str = "https://w3id.org/termgraph/model#linkSource";
    pub const LINK_TARGET: &str = "https://w3id.org/termgraph/model#linkTarget";
    pub const LINK_ACTIVE: &str = "https://w3id.org/termgraph/model#linkActive";
}
