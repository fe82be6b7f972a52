// cli/login.rs — `gymctl login/logout/whoami` session commands.

use anyhow::{bail, Result};

use super::{read_line, Console};
use crate::auth::{LoginConfig, LoginFlow, LoginStep};
use crate::permissions::format_display_name;
use crate::phone;
use crate::session::AuthUser;

/// `gymctl login [--phone <number>]`
///
/// Drives the two-step flow on stdin: phone entry, then OTP entry with
/// `r` (resend), `b` (back to phone), and `q` (quit) as commands. A full
/// line of digits fills the code at once; shorter input lands digit by
/// digit, submitting automatically when the last cell fills.
pub async fn cmd_login(console: &Console, phone_arg: Option<String>, quiet: bool) -> Result<()> {
    if let Some(session) = console.sessions.current() {
        println!(
            "Already logged in as {} ({}). Run `gymctl logout` to switch accounts.",
            session.user.phone_number,
            format_display_name(&session.user.role.name)
        );
        return Ok(());
    }

    let mut flow = LoginFlow::new(
        console.client.clone(),
        std::sync::Arc::clone(&console.sessions),
        LoginConfig::from_console(&console.config),
    );
    let otp_length = console.config.otp.length;

    let mut pending_phone = phone_arg;
    let user = loop {
        match flow.step() {
            LoginStep::PhoneEntry => {
                let entry = match pending_phone.take() {
                    Some(p) => p,
                    None => read_line("Phone number: ")?,
                };
                if entry.is_empty() {
                    continue;
                }
                flow.set_phone_input(&entry);
                if flow.submit_phone().await {
                    if !quiet {
                        println!("✓ OTP sent to {}", phone::normalize(&entry));
                        println!("Resend unlocks in {}s.", flow.countdown_remaining());
                    }
                } else if let Some(err) = flow.error() {
                    eprintln!("{err}");
                }
            }
            LoginStep::OtpEntry => {
                let prompt = format!("OTP ({otp_length} digits) [r resend, b back, q quit]: ");
                match read_line(&prompt)?.as_str() {
                    "q" => bail!("Login cancelled."),
                    "b" => flow.back_to_phone(),
                    "r" => {
                        let remaining = flow.countdown_remaining();
                        if flow.resend().await {
                            match flow.error() {
                                Some(err) => eprintln!("{err}"),
                                None if !quiet => {
                                    println!(
                                        "✓ OTP re-sent. Resend unlocks again in {}s.",
                                        flow.countdown_remaining()
                                    );
                                }
                                None => {}
                            }
                        } else {
                            println!("Resend locked for another {remaining}s.");
                        }
                    }
                    "" => {}
                    entry => {
                        if let Some(user) = feed_otp(&mut flow, entry, otp_length).await {
                            break user;
                        }
                        match flow.error() {
                            Some(err) => eprintln!("{err}"),
                            None => println!(
                                "{} of {otp_length} digits entered.",
                                flow.otp().code().len()
                            ),
                        }
                    }
                }
            }
        }
    };

    println!(
        "✓ Logged in as {} ({})",
        user.phone_number,
        format_display_name(&user.role.name)
    );
    Ok(())
}

/// A line holding a full code goes through the paste path; anything shorter
/// walks the cells one digit at a time.
async fn feed_otp(flow: &mut LoginFlow, entry: &str, otp_length: usize) -> Option<AuthUser> {
    let digits = entry.chars().filter(char::is_ascii_digit).count();
    if digits >= otp_length {
        return flow.otp_paste(entry).await;
    }
    for ch in entry.chars() {
        let mut cell = [0u8; 4];
        if let Some(user) = flow.otp_enter(ch.encode_utf8(&mut cell)).await {
            return Some(user);
        }
    }
    None
}

/// `gymctl logout`
pub async fn cmd_logout(console: &Console) -> Result<()> {
    if !console.sessions.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    console.sessions.clear()?;
    println!("✓ Logged out.");
    Ok(())
}

/// `gymctl whoami [--json]`
pub async fn cmd_whoami(console: &Console, json: bool) -> Result<()> {
    let session = console.require_auth()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&session.user)?);
        return Ok(());
    }
    println!("Phone: {}", session.user.phone_number);
    println!("Role:  {}", format_display_name(&session.user.role.name));
    println!("User:  {}", session.user.id);
    Ok(())
}
