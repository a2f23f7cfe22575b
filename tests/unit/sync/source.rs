use super::*;
use crate::pledge::form::Pathway;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vegpatch-{}-{name}", std::process::id()))
}

#[test]
fn file_source_reads_totaliser_document() {
    let path = temp_path("totals-ok.json");
    std::fs::write(&path, r#"{"total_tokens": 4200, "goal": 100000}"#).unwrap();
    let mut src = FileTotalsSource::new(&path);
    assert_eq!(
        src.current_totals().unwrap(),
        Totals {
            total: 4200,
            goal: 100_000
        }
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_source_reports_missing_and_bad_documents() {
    let mut missing = FileTotalsSource::new(temp_path("totals-missing.json"));
    assert!(missing.current_totals().is_err());

    let path = temp_path("totals-bad.json");
    std::fs::write(&path, r#"{"total_tokens": 1, "goal": 0}"#).unwrap();
    assert!(FileTotalsSource::new(&path).current_totals().is_err());
    std::fs::write(&path, r#"{"total": 1}"#).unwrap();
    assert!(FileTotalsSource::new(&path).current_totals().is_err());
    let _ = std::fs::remove_file(&path);
}

struct Backend(PatchResult<u64>, usize);

impl PledgeSubmitter for Backend {
    fn submit_pledge(&mut self, _form: &PledgeForm) -> PatchResult<u64> {
        self.1 += 1;
        match &self.0 {
            Ok(v) => Ok(*v),
            Err(_) => Err(PatchError::validation("backend down")),
        }
    }
}

fn school_form() -> PledgeForm {
    let mut f = PledgeForm::new("Ada", "ada@example.org", "Option 3", Pathway::School);
    f.school_name = Some("Hill Primary".into());
    f.class_name = Some("Year 3".into());
    f.class_size = Some(24);
    f
}

#[test]
fn backend_award_wins_when_available() {
    let mut be = Backend(Ok(40), 0);
    assert_eq!(submit_with_fallback(&mut be, &school_form()).unwrap(), 40);
}

#[test]
fn failed_backend_falls_back_to_estimate() {
    let mut be = Backend(Err(PatchError::validation("x")), 0);
    assert_eq!(submit_with_fallback(&mut be, &school_form()).unwrap(), 24);
    assert_eq!(be.1, 1);
}

#[test]
fn invalid_form_is_never_submitted() {
    let mut be = Backend(Ok(40), 0);
    let mut form = school_form();
    form.class_size = None;
    assert!(submit_with_fallback(&mut be, &form).is_err());
    assert_eq!(be.1, 0);
}
