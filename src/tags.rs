use reqwest::Client;
use scraper::Html;

use crate::{error::ConvertErr, selectors::Selectors};

/// Tag labels linked from a published page.
pub fn parse_tags(html: &str, selectors: &Selectors) -> Vec<String> {
    Html::parse_document(html)
        .select(&selectors.tag)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Exports do not carry tags, the published page does. Single attempt, no retry.
pub async fn fetch_tags(
    client: &Client,
    url: &str,
    selectors: &Selectors,
) -> Result<Vec<String>, ConvertErr> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ConvertErr::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let body = response.text().await?;
    Ok(parse_tags(&body, selectors))
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    const PAGE: &str = r#"<html><body><article>
        <ul class="tags"><li><a href="/tag/testing">Testing</a></li>
        <li><a href="/tag/ab"> AB Testing </a></li><li><a href="/tag/x"></a></li></ul>
        <ul class="related"><li><a href="/tag/other">Not a tag</a></li></ul>
        </article></body></html>"#;

    #[test]
    fn tags_in_document_order() {
        let tags = parse_tags(PAGE, &Selectors::new().unwrap());
        assert_eq!(tags, vec!["Testing".to_string(), "AB Testing".to_string()]);
    }

    #[tokio::test]
    async fn fetches_and_parses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a-b-tests-f57f5c1a492"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let tags = fetch_tags(
            &Client::new(),
            &format!("{}/a-b-tests-f57f5c1a492", server.uri()),
            &Selectors::new().unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let res = fetch_tags(&Client::new(), &server.uri(), &Selectors::new().unwrap()).await;
        assert!(matches!(res, Err(ConvertErr::Status { .. })));
    }

    #[tokio::test]
    async fn invalid_url_is_an_error() {
        let res = fetch_tags(&Client::new(), "", &Selectors::new().unwrap()).await;
        assert!(matches!(res, Err(ConvertErr::Http(_))));
    }
}
