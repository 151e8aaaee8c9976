use crate::services::email_service::{EmailBody, EmailContent};

pub const COMPANY_NAME: &str = "Work4U";
pub const ENGLISH_TEST_URL: &str = "https://forms.gle/YvgBWxriV2hPfn82A";

pub fn applicant_confirmation(first_name: &str, last_name: &str) -> EmailContent {
    let body = format!(
        "Dear {first_name} {last_name},\n\n\
         Thank you for applying for the chat moderator position at {COMPANY_NAME}.\n\n\
         We have received your application and our recruitment team will review it shortly. \
         You will hear from us by email once a decision has been made.\n\n\
         Kind regards,\n\
         {COMPANY_NAME}\n\
         Recruitment Team\n"
    );

    EmailContent {
        subject: "Application Received".to_string(),
        body: EmailBody::Text(body),
    }
}

pub fn admin_notification(
    first_name: &str,
    last_name: &str,
    email: &str,
    language: &str,
    submitted_at: &str,
) -> EmailContent {
    let body = format!(
        "A new application has been submitted.\n\n\
         Name: {first_name} {last_name}\n\
         Email: {email}\n\
         Language: {language}\n\
         Submitted: {submitted_at}\n\n\
         Review it in the admin dashboard.\n"
    );

    EmailContent {
        subject: format!("New Application: {first_name} {last_name}"),
        body: EmailBody::Text(body),
    }
}

pub fn approval(first_name: &str, last_name: &str) -> EmailContent {
    let full_name = escape_html(&format!("{first_name} {last_name}"));
    let body = format!(
        r#"<p>Dear {full_name},</p>

<p>We are excited to inform you that your application has been approved. Welcome on board!</p>

<p><strong>About the Role</strong><br>
As a chat moderator you will reply to customer messages through our secure web-based platform, in English, keeping every conversation friendly, engaging and creative. Your goal is simple: keep the conversation going and enjoyable for the user while typing quickly and clearly.</p>

<p><strong>Requirements</strong></p>
<ul>
    <li>Excellent written English and creativity in conversation.</li>
    <li>A computer or laptop (mobile devices are not supported).</li>
    <li>A reliable high-speed internet connection.</li>
    <li>A verified bank account or PayPal account for payments.</li>
</ul>

<p><strong>Work Hours</strong><br>
You choose your own shifts. Our busiest hours are late evenings and weekends, which are highly recommended for maximizing your earnings. We ask every moderator to commit to at least 12 hours per week, booked in one-hour shifts.</p>

<p><strong>Pay Structure</strong><br>
Payment: &euro;0.10 per sent message.<br>
Experienced moderators send 80 to 100+ messages per hour.<br>
Earnings are calculated from the first to the last day of each month and paid on the 3rd day of the following month, via PayPal or direct bank transfer.</p>

<p><strong>Training &amp; Support</strong></p>
<ul>
    <li>A training manual covering everything you need to know.</li>
    <li>A one-on-one session with an experienced team leader.</li>
    <li>Ongoing support from our team whenever you need it.</li>
</ul>

<p><strong>Freelance Basis</strong><br>
This is a freelance, self-employed role. You manage your own time and schedule.</p>

<p><strong>Next Steps</strong><br>
Please complete a short English test using the link below:<br>
<a href="{ENGLISH_TEST_URL}">{ENGLISH_TEST_URL}</a><br>
Our team will review your answers and get back to you within 3 business days about the next stage of onboarding.</p>

<p>Welcome aboard!</p>

<p>Warm regards,<br>
{COMPANY_NAME}<br>
Recruitment Team</p>
"#
    );

    EmailContent {
        subject: "Your Application Has Been Approved".to_string(),
        body: EmailBody::Html(body),
    }
}

pub fn rejection(first_name: &str, last_name: &str) -> EmailContent {
    let full_name = escape_html(&format!("{first_name} {last_name}"));
    let body = format!(
        r#"<p>Dear {full_name},</p>

<p>Thank you for your interest in joining {COMPANY_NAME} and for the time you spent on your application.</p>

<p>After careful consideration we regret to inform you that we will not be moving forward with your application at this time.</p>

<p>We wish you every success in your job search.</p>

<p>Kind regards,<br>
{COMPANY_NAME}<br>
Recruitment Team</p>
"#
    );

    EmailContent {
        subject: "Update on Your Application".to_string(),
        body: EmailBody::Html(body),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
