use crate::models::UserAccount;

pub fn render_index(user: Option<&UserAccount>, streak: u32) -> String {
    match user {
        Some(user) => HOME_HTML
            .replace("{{STYLE}}", STYLE)
            .replace("{{USERNAME}}", &escape_html(&user.username))
            .replace("{{STREAK}}", &streak.to_string()),
        None => LOGIN_HTML.replace("{{STYLE}}", STYLE),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = r#"
    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #c8e6c9, #e0f7fa);
      color: #1b3a2a;
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }
    .card {
      width: min(640px, 100%);
      background: rgba(255, 255, 255, 0.9);
      border-radius: 16px;
      box-shadow: 0 20px 50px rgba(27, 58, 42, 0.15);
      padding: 32px;
      display: grid;
      gap: 16px;
    }
    input, textarea, button { font: inherit; padding: 10px; border-radius: 8px; }
    input, textarea { border: 1px solid #b0bec5; }
    button { border: none; background: #2e7d32; color: white; cursor: pointer; }
    .streak { font-size: 1.3rem; font-weight: 600; color: #2e7d32; }
    .error { color: #c62828; min-height: 1.2em; }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Serenity - Sign in</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="card">
    <h1>Welcome to Serenity</h1>
    <input id="email" type="email" placeholder="Email" />
    <input id="username" placeholder="Username (sign up only)" />
    <input id="password" type="password" placeholder="Password" />
    <button id="login">Log in</button>
    <button id="signup">Create account</button>
    <p class="error" id="error"></p>
  </main>
  <script>
    async function submit(path, body) {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
      });
      if (res.ok) { location.reload(); return; }
      document.getElementById('error').textContent = await res.text();
    }
    const value = (id) => document.getElementById(id).value;
    document.getElementById('login').onclick = () =>
      submit('/api/login', { email: value('email'), password: value('password') });
    document.getElementById('signup').onclick = () =>
      submit('/api/signup', { email: value('email'), username: value('username'), password: value('password') });
  </script>
</body>
</html>
"#;

const HOME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Serenity - Diary</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="card">
    <h1>Hello, {{USERNAME}}</h1>
    <p class="streak">Streak: <span id="streak">{{STREAK}}</span></p>
    <input id="date" type="date" />
    <textarea id="text" rows="8" placeholder="Your thoughts"></textarea>
    <button id="save">Save entry</button>
    <p class="error" id="error"></p>
    <ul id="entries"></ul>
    <button id="logout">Log out</button>
  </main>
  <script>
    const dateInput = document.getElementById('date');
    dateInput.value = new Date().toISOString().substring(0, 10);
    dateInput.max = dateInput.value;

    function render(data) {
      document.getElementById('streak').textContent = data.streak;
      const list = document.getElementById('entries');
      list.replaceChildren(...data.entries.map((entry) => {
        const item = document.createElement('li');
        item.textContent = `${entry.date} ${entry.time} - ${entry.text}`;
        return item;
      }));
    }

    async function load() {
      const res = await fetch('/api/diary');
      if (res.ok) render(await res.json());
    }

    document.getElementById('save').onclick = async () => {
      const res = await fetch('/api/diary', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ date: dateInput.value, text: document.getElementById('text').value }),
      });
      if (!res.ok) {
        alert(await res.text());
        return;
      }
      document.getElementById('text').value = '';
      render(await res.json());
    };

    document.getElementById('logout').onclick = async () => {
      await fetch('/api/logout', { method: 'POST' });
      location.reload();
    };

    load();
  </script>
</body>
</html>
"#;
