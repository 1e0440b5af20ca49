use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

pub async fn index_page() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        r#"<!DOCTYPE html>
        <html lang="ko">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>두피 측정기</title>
            <style>
                * { margin: 0; padding: 0; box-sizing: border-box; }

                body {
                    background: #fafafa;
                    color: #222;
                    font-family: -apple-system, 'Apple SD Gothic Neo', sans-serif;
                    display: flex;
                    justify-content: center;
                    padding: 40px 16px;
                }

                .card {
                    background: #fff;
                    border: 1px solid #ddd;
                    border-radius: 12px;
                    padding: 24px;
                    width: 100%;
                    max-width: 420px;
                }

                h1 { font-size: 1.4rem; margin-bottom: 16px; }

                label { display: block; font-size: 0.9rem; margin: 12px 0 4px; }

                select, input[type=file] { width: 100%; }

                button {
                    margin-top: 20px;
                    width: 100%;
                    padding: 10px;
                    border: none;
                    border-radius: 8px;
                    background: #222;
                    color: #fff;
                    font-size: 1rem;
                    cursor: pointer;
                }

                #result { margin-top: 24px; white-space: pre-line; text-align: center; }
                #result img { max-width: 200px; margin: 12px auto; display: block; }
                .score { font-size: 2rem; font-weight: 700; }
                .error { color: #c0392b; }
            </style>
        </head>
        <body>
            <div class="card">
                <h1>두피 측정기</h1>
                <form id="upload-form">
                    <label for="photo">정수리 사진</label>
                    <input type="file" id="photo" name="photo" accept="image/*" required>

                    <label for="hair_color">머리 색</label>
                    <select id="hair_color" name="hair_color" required>
                        <option value="black">검은색</option>
                        <option value="dark_brown">어두운 갈색</option>
                        <option value="light_brown">밝은 갈색</option>
                        <option value="dyed">염색</option>
                    </select>

                    <button type="submit">측정하기</button>
                </form>
                <div id="result"></div>
            </div>

            <script>
                const form = document.getElementById('upload-form');
                const result = document.getElementById('result');

                form.addEventListener('submit', async (event) => {
                    event.preventDefault();
                    result.textContent = '분석 중...';

                    try {
                        const response = await fetch('/upload', {
                            method: 'POST',
                            body: new FormData(form),
                        });
                        const data = await response.json();

                        if (!response.ok) {
                            result.innerHTML = '';
                            const err = document.createElement('p');
                            err.className = 'error';
                            err.textContent = data.error || 'Request failed';
                            result.appendChild(err);
                            return;
                        }

                        result.innerHTML = '';
                        const score = document.createElement('p');
                        score.className = 'score';
                        score.textContent = data.score + '%';
                        const grade = document.createElement('p');
                        grade.textContent = data.grade;
                        const img = document.createElement('img');
                        img.src = data.image_url;
                        img.alt = 'result';
                        const quote = document.createElement('p');
                        quote.textContent = data.quote;
                        const comment = document.createElement('p');
                        comment.textContent = data.comment;
                        result.append(score, grade, img, quote, comment);
                    } catch (e) {
                        result.textContent = 'Request failed';
                    }
                });
            </script>
        </body>
        </html>"#,
    )
}
