//! Board markup fixtures shared by unit tests.

/// One entry of a fixture board list.
pub(crate) struct Row<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub pinned: bool,
}

pub(crate) fn row<'a>(id: &'a str, title: &'a str) -> Row<'a> {
    Row {
        id,
        title,
        pinned: false,
    }
}

pub(crate) fn pinned<'a>(id: &'a str, title: &'a str) -> Row<'a> {
    Row {
        id,
        title,
        pinned: true,
    }
}

/// Render a board list page in the Mirae campus markup.
pub(crate) fn board_html(rows: &[Row<'_>]) -> String {
    let items: String = rows
        .iter()
        .map(|r| {
            let class = if r.pinned { r#" class="board-noti""# } else { "" };
            format!(
                r#"
        <li{class}>
          <div class="num"><span>{id}</span></div>
          <a href="/bbs/wj/1415/{id}/artclView.do">
            <div class="title"><strong>{title}</strong></div>
          </a>
          <div class="info">
            <span class="typeCL">학사</span>
            <div class="date-area"><span>작성일</span> 2026.02.01</div>
            <div class="date-area"><span>기간</span> 2026.02.01 ~ 2026.02.28</div>
          </div>
        </li>"#,
                id = r.id,
                title = r.title,
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
  <body>
    <div class="boardWrap">
      <ul>{items}
      </ul>
    </div>
  </body>
</html>"#
    )
}

/// Answer a single HTTP request on a local port with a canned response.
///
/// Returns the base URL to send the request to. The whole request, body
/// included, is read before the reply is written.
pub(crate) async fn respond_once(status_line: &'static str, body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request_complete(&request) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}/")
}

fn request_complete(request: &[u8]) -> bool {
    let Some(header_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}
