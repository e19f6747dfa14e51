use validator::Validate;

use crate::models::vacancy::Vacancy;
use crate::services::api_client::MultipartBody;
use crate::utils::upload::{validate_upload, UploadFile, RESUME_RULES};
use crate::utils::validation::{check, validate_not_blank, validate_strict_email_shape, FieldErrors};

/// The vacancy an applicant is applying to, copied from the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTarget {
    pub id: String,
    pub title: String,
    pub company: String,
}

impl From<&Vacancy> for JobTarget {
    fn from(vacancy: &Vacancy) -> Self {
        Self {
            id: vacancy.id.clone(),
            title: vacancy.title.clone(),
            company: vacancy.company.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ApplicationForm {
    pub job: Option<JobTarget>,

    #[validate(custom(function = "validate_not_blank", message = "Full name is required."))]
    pub name: String,

    #[validate(custom(function = "validate_strict_email_shape", message = "Invalid email format."))]
    pub email: String,

    pub cover_letter: String,

    pub resume: Option<UploadFile>,
}

impl ApplicationForm {
    pub fn for_job(job: JobTarget) -> Self {
        Self {
            job: Some(job),
            ..Self::default()
        }
    }

    /// Checks a picked file right away; a rejected file leaves no resume attached.
    pub fn attach_resume(&mut self, file: UploadFile) -> Result<(), String> {
        match validate_upload(&file, &RESUME_RULES) {
            Ok(()) => {
                self.resume = Some(file);
                Ok(())
            }
            Err(message) => {
                self.resume = None;
                Err(message)
            }
        }
    }

    pub fn remove_resume(&mut self) {
        self.resume = None;
    }

    pub fn check_fields(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.email.trim().is_empty() {
            errors.insert("email", "Email address is required.");
        }
        errors.merge(check(self));

        match &self.resume {
            None => errors.insert(
                "resume",
                format!("Resume ({}) is required.", RESUME_RULES.extensions.join(", ")),
            ),
            Some(file) => {
                if let Err(message) = validate_upload(file, &RESUME_RULES) {
                    errors.insert("resume", message);
                }
            }
        }
        if self.job.is_none() {
            errors.insert("job", "No vacancy selected.");
        }
        errors
    }

    /// Multipart body of `POST /jobs/apply`; the file travels as `resume`.
    pub fn to_multipart(&self) -> MultipartBody {
        let mut body = MultipartBody::new();
        if let Some(job) = &self.job {
            body = body
                .text("jobId", &job.id)
                .text("jobTitle", &job.title)
                .text("companyName", &job.company);
        }
        body = body
            .text("name", self.name.trim())
            .text("email", self.email.trim())
            .text("coverLetter", &self.cover_letter);
        if let Some(resume) = &self.resume {
            body = body.file("resume", resume.clone());
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::Part;

    fn job() -> JobTarget {
        JobTarget {
            id: "j1".into(),
            title: "Data Analyst".into(),
            company: "Acme".into(),
        }
    }

    #[test]
    fn resume_is_required() {
        let mut form = ApplicationForm::for_job(job());
        form.name = "Jane".into();
        form.email = "jane@acme.io".into();
        let errors = form.check_fields();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("resume"), Some("Resume (.pdf, .doc, .docx) is required."));
    }

    #[test]
    fn blank_email_reports_required_not_format() {
        let form = ApplicationForm::for_job(job());
        let errors = form.check_fields();
        assert_eq!(errors.get("email"), Some("Email address is required."));
        assert_eq!(errors.get("name"), Some("Full name is required."));
    }

    #[test]
    fn doubled_at_sign_is_an_invalid_email() {
        let mut form = ApplicationForm::for_job(job());
        form.name = "Jane".into();
        form.attach_resume(UploadFile::new("cv.pdf", "application/pdf", vec![1u8; 4]))
            .unwrap();

        form.email = "a@@b.co".into();
        let errors = form.check_fields();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("email"));

        form.email = "asha@example.com".into();
        assert!(form.check_fields().is_empty());
    }

    #[test]
    fn rejected_pick_leaves_no_file() {
        let mut form = ApplicationForm::for_job(job());
        form.attach_resume(UploadFile::new("cv.pdf", "application/pdf", vec![1u8; 4]))
            .unwrap();
        let err = form
            .attach_resume(UploadFile::new("cv.png", "image/png", vec![1u8; 4]))
            .unwrap_err();
        assert!(err.starts_with("Invalid file type"));
        assert!(form.resume.is_none());
    }

    #[test]
    fn multipart_carries_job_and_resume() {
        let mut form = ApplicationForm::for_job(job());
        form.name = "Jane".into();
        form.email = "jane@acme.io".into();
        form.attach_resume(UploadFile::new("cv.pdf", "application/pdf", vec![1u8; 4]))
            .unwrap();
        let body = form.to_multipart();
        assert_eq!(body.text_value("jobId"), Some("j1"));
        assert_eq!(body.text_value("companyName"), Some("Acme"));
        assert!(body
            .parts
            .iter()
            .any(|p| matches!(p, Part::File { name, .. } if name == "resume")));
    }
}
