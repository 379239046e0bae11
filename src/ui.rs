use crate::models::{DailyStats, StreakInfo, WeeklyStats};

pub fn render_index(
    display_date: &str,
    daily: &DailyStats,
    streak: &StreakInfo,
    weekly: &WeeklyStats,
) -> String {
    let progress = daily.achievement_rate.min(100);
    let banner = if daily.is_goal_achieved && daily.goal_steps > 0 {
        r#"<p class="banner">🎉 目標達成！おめでとうございます！</p>"#
    } else {
        ""
    };

    INDEX_HTML
        .replace("{{DATE}}", display_date)
        .replace("{{STEPS}}", &daily.steps.to_string())
        .replace("{{GOAL}}", &daily.goal_steps.to_string())
        .replace("{{RATE}}", &daily.achievement_rate.to_string())
        .replace("{{PROGRESS}}", &progress.to_string())
        .replace("{{BANNER}}", banner)
        .replace("{{CURRENT_STREAK}}", &streak.current_streak.to_string())
        .replace("{{LONGEST_STREAK}}", &streak.longest_streak.to_string())
        .replace("{{WEEK_START}}", &weekly.week_start)
        .replace("{{WEEK_END}}", &weekly.week_end)
        .replace("{{WEEK_TOTAL}}", &weekly.total_steps.to_string())
        .replace("{{WEEK_AVERAGE}}", &weekly.average_steps.to_string())
        .replace("{{WEEK_ACHIEVED}}", &weekly.days_achieved.to_string())
        .replace("{{WEEK_RECORDED}}", &weekly.days_recorded.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Step Memo</title>
  <style>
    :root {
      --bg: #f4f7f2;
      --ink: #23302a;
      --accent: #2f9e6b;
      --muted: #6b7a72;
      --card: #ffffff;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Hiragino Sans", "Noto Sans JP", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px;
    }

    .app {
      width: min(520px, 100%);
      background: var(--card);
      border-radius: 20px;
      box-shadow: 0 16px 40px rgba(35, 48, 42, 0.12);
      padding: 28px;
      display: grid;
      gap: 20px;
    }

    .steps {
      font-size: 3rem;
      font-weight: 700;
      margin: 0;
    }

    .bar {
      height: 12px;
      border-radius: 6px;
      background: #e3ebe6;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .muted {
      color: var(--muted);
    }

    .banner {
      background: #fff4d6;
      border-radius: 12px;
      padding: 12px;
      text-align: center;
    }

    form {
      display: flex;
      gap: 8px;
    }

    input {
      flex: 1;
      font-size: 1rem;
      padding: 10px;
      border: 1px solid #cfd8d3;
      border-radius: 10px;
    }

    button {
      background: var(--accent);
      color: #fff;
      border: none;
      border-radius: 10px;
      padding: 10px 18px;
      font-size: 1rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <p class="muted">{{DATE}}</p>
      <p class="steps">{{STEPS}} 歩</p>
      <p class="muted">目標 {{GOAL}} 歩 ・ 達成率 {{RATE}}%</p>
      <div class="bar"><span style="width: {{PROGRESS}}%"></span></div>
    </header>
    {{BANNER}}
    <form method="post" action="/record">
      <input name="steps" inputmode="numeric" placeholder="歩数を入力" required />
      <button type="submit">歩数を記録</button>
    </form>
    <section>
      <p>🔥 連続達成 {{CURRENT_STREAK}} 日 <span class="muted">(最長 {{LONGEST_STREAK}} 日)</span></p>
      <p class="muted">{{WEEK_START}} 〜 {{WEEK_END}}</p>
      <p>合計 {{WEEK_TOTAL}} 歩 ・ 平均 {{WEEK_AVERAGE}} 歩 ・ 達成 {{WEEK_ACHIEVED}}/{{WEEK_RECORDED}} 日</p>
    </section>
  </main>
</body>
</html>
"#;
