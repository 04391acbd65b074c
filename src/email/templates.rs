//! HTML bodies for the four outbound emails. Kept as plain string
//! substitution; anything fancier belongs in the email provider.

const VERIFICATION_EMAIL: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2>Verify your email</h2>
  <p>Thanks for signing up. Enter this code to verify your email address:</p>
  <p style="font-size: 32px; font-weight: bold; letter-spacing: 6px; text-align: center;">{verification_code}</p>
  <p>The code expires in 24 hours. If you didn't create an account, you can ignore this email.</p>
</body>
</html>"#;

const WELCOME_EMAIL: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2>Welcome, {name}!</h2>
  <p>Your email address is verified and your account is ready to use.</p>
</body>
</html>"#;

const PASSWORD_RESET_EMAIL: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2>Reset your password</h2>
  <p>We received a request to reset your password. Click the link below to choose a new one:</p>
  <p style="text-align: center;"><a href="{reset_url}">Reset password</a></p>
  <p>The link expires in 1 hour. If you didn't ask for a reset, you can ignore this email.</p>
</body>
</html>"#;

const RESET_SUCCESS_EMAIL: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2>Password changed</h2>
  <p>Your password was updated successfully. If this wasn't you, contact support immediately.</p>
</body>
</html>"#;

pub fn verification_email(code: &str) -> String {
    VERIFICATION_EMAIL.replace("{verification_code}", code)
}

pub fn welcome_email(name: &str) -> String {
    WELCOME_EMAIL.replace("{name}", name)
}

pub fn password_reset_email(reset_url: &str) -> String {
    PASSWORD_RESET_EMAIL.replace("{reset_url}", reset_url)
}

pub fn reset_success_email() -> String {
    RESET_SUCCESS_EMAIL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_email_embeds_the_code() {
        let html = verification_email("123456");
        assert!(html.contains("123456"));
        assert!(!html.contains("{verification_code}"));
    }

    #[test]
    fn password_reset_email_embeds_the_link() {
        let html = password_reset_email("http://localhost:5173/reset-password/abcd");
        assert!(html.contains(r#"href="http://localhost:5173/reset-password/abcd""#));
        assert!(!html.contains("{reset_url}"));
    }

    #[test]
    fn welcome_email_greets_by_name() {
        assert!(welcome_email("ann").contains("Welcome, ann!"));
    }
}
