use crate::{
    TransferError, info,
    oauth::{Authorizer, OAuthSettings},
    success,
    types::AccessToken,
    warning,
};

/// Runs the consent flow for one service and reports progress on the terminal.
pub async fn authorize(
    service: &str,
    settings: OAuthSettings,
    open_browser: bool,
) -> Result<AccessToken, TransferError> {
    let authorizer = Authorizer::new(settings)?;

    info!(
        "Starting local callback server for {}",
        authorizer.settings().redirect_uri
    );
    info!(
        "Please make sure this redirect URI is added to your {} app settings!",
        service
    );

    let token = authorizer
        .authorize(|prompt| {
            info!(
                "Go to the following URL to authorize with {}:\n{}",
                service, prompt.url
            );
            if open_browser && webbrowser::open(&prompt.url).is_err() {
                warning!("Failed to open browser. Please navigate to the URL above manually.");
            }
            info!("Waiting for authorization callback...");
        })
        .await?;

    success!("{} authorization successful!", service);
    Ok(token)
}
