//! Integration tests for result ingestion and code import

use unitrack::adapters::delimited::parse_rows;
use unitrack::core::codes::import_codes;
use unitrack::core::ingest::ResultIngestor;
use unitrack::core::roster::{RosterRepository, RosterStore};
use unitrack::domain::{AssessmentBook, AssessmentKey, CandidateName, Identity, IngestError, StudentId, UnitrackError};

fn roster() -> RosterStore {
    RosterStore::from_identities(vec![
        Identity::new(StudentId::new("1001").unwrap(), "Ada Lovelace", "ada@uni.ac.uk", "Dr Babbage"),
        Identity::new(StudentId::new("1002").unwrap(), "Alan Turing", "alan@uni.ac.uk", "Dr Church"),
        Identity::new(StudentId::new("1003").unwrap(), "Grace Hopper", "grace@uni.ac.uk", "Dr Aiken"),
    ])
}

const RESULTS: &str = "\"#Module\",\"#Ass\",\"#Cand Key\",\"#Mark\",\"#Grade\"\n\
CS101,A1,\"#X7/1\",72,A\n\
CS101,A1,1002,55,C\n\
CS101,A1,QQ9/2,40,D\n\
CS101,Exam,X7/1,absent,\n";

#[test]
fn test_codes_then_results_end_to_end() {
    let mut store = roster();

    let codes = parse_rows("1001,X7\n9999,Y1\n,\n", ',');
    let code_summary = import_codes(&codes, &mut store);
    assert_eq!(code_summary.imported, 1);
    assert_eq!(code_summary.missing, 2);
    assert_eq!(
        code_summary.message(),
        "In total there were 1 codes successfully imported and 2 codes that did not match any loaded student."
    );

    let table = parse_rows(RESULTS, ',');
    let outcome = ResultIngestor::new().ingest_table(&table, &mut store).unwrap();

    assert_eq!(outcome.summary.total_rows, 4);
    assert_eq!(outcome.summary.resolved, 3);
    assert_eq!(outcome.summary.unresolved, 1);
    assert_eq!(outcome.assessments.len(), 2);

    let a1 = outcome
        .assessments
        .get(&AssessmentKey::new("CS101", "A1"))
        .unwrap();
    let candidates: Vec<&str> = a1.entries().iter().map(|e| e.candidate.as_str()).collect();
    assert_eq!(candidates, vec!["1001", "1002", "QQ9"]);
    assert_eq!(a1.entries()[2].name, CandidateName::Unresolved);

    let ada = store.get(&StudentId::new("1001").unwrap()).unwrap();
    assert_eq!(ada.results().len(), 2);
    assert_eq!(ada.results()[1].mark, None);
    assert_eq!(ada.mean_mark(), Some(72.0));
}

#[test]
fn test_own_id_resolves_without_registration() {
    let mut store = roster();
    let table = parse_rows("module,ass,candkey,mark,grade\nMA201,T1,1003/4,91,A\n", ',');
    let outcome = ResultIngestor::new().ingest_table(&table, &mut store).unwrap();

    assert_eq!(outcome.summary.resolved, 1);
    let grace = store.get(&StudentId::new("1003").unwrap()).unwrap();
    assert_eq!(grace.results()[0].assessment, "MA201 T1");
    assert!(grace.anonymous_codes().is_empty());
}

#[test]
fn test_reingest_adds_no_student_results() {
    let mut store = roster();
    import_codes(&parse_rows("1001,X7\n", ','), &mut store);
    let table = parse_rows(RESULTS, ',');
    let ingestor = ResultIngestor::new();
    let mut book = AssessmentBook::new();

    let first = ingestor.ingest_table(&table, &mut store).unwrap();
    book.merge(first.assessments);
    let sizes: Vec<usize> = book.iter().map(|a| a.len()).collect();

    let second = ingestor.ingest_table(&table, &mut store).unwrap();
    let added = book.merge(second.assessments);

    assert_eq!(first.summary.student_results_added, 3);
    assert_eq!(second.summary.student_results_added, 0);
    assert_eq!(second.summary.resolved, first.summary.resolved);
    assert_eq!(added, 0);
    assert_eq!(book.iter().map(|a| a.len()).collect::<Vec<_>>(), sizes);
    assert_eq!(sizes, vec![3, 1]);

    let ada = store.get(&StudentId::new("1001").unwrap()).unwrap();
    assert_eq!(ada.results().len(), 2);
    let alan = store.get(&StudentId::new("1002").unwrap()).unwrap();
    assert_eq!(alan.results().len(), 1);
}

#[test]
fn test_missing_mark_column_aborts_with_zero_mutation() {
    let mut store = roster();
    let table = parse_rows("module,ass,candkey,grade\nCS101,A1,1001,A\n", ',');
    let err = ResultIngestor::new().ingest_table(&table, &mut store).unwrap_err();

    assert!(err.is_structural());
    assert!(matches!(
        err,
        UnitrackError::Ingest(IngestError::MissingColumn { column: "mark" })
    ));
    assert!(store.identities().iter().all(|i| i.results().is_empty()));
}

#[test]
fn test_empty_table_rejected() {
    let mut store = roster();
    let table: Vec<Vec<String>> = Vec::new();
    let err = ResultIngestor::new().ingest_table(&table, &mut store).unwrap_err();
    assert!(matches!(err, UnitrackError::Ingest(IngestError::EmptyInput)));
}

#[test]
fn test_short_rows_counted_and_skipped() {
    let mut store = roster();
    let table = parse_rows("module,ass,candkey,mark,grade\nCS101,A1\nCS101,A1,1001,60,B\n", ',');
    let outcome = ResultIngestor::new().ingest_table(&table, &mut store).unwrap();

    assert_eq!(outcome.summary.skipped_rows, 1);
    assert_eq!(outcome.summary.unresolved, 1);
    assert_eq!(outcome.summary.resolved, 1);
}

#[test]
fn test_reordered_and_extra_columns() {
    let mut store = roster();
    let table = parse_rows(
        "Grade;Notes;Mark;CandKey;Ass;Module\nB;late;64;1002;Essay;HI110\n",
        ';',
    );
    let outcome = ResultIngestor::new().ingest_table(&table, &mut store).unwrap();

    let essay = outcome
        .assessments
        .get(&AssessmentKey::new("HI110", "Essay"))
        .unwrap();
    assert_eq!(essay.entries()[0].mark, "64");
    assert_eq!(essay.entries()[0].grade, "B");
}

#[test]
fn test_first_code_registration_wins() {
    let mut store = roster();
    let codes = parse_rows("1001,SHARED\n1002,SHARED\n", ',');
    let summary = import_codes(&codes, &mut store);

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(
        store.resolve_code("SHARED").unwrap().id().as_str(),
        "1001"
    );
}
