//! Embedded HTML/CSS/JS frontend for the wardroom web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies. All derived
//! values (cards, layout, filtered rows) come from the JSON API; the page
//! only renders them.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>S/4HANA Migration Command Center</title>
<style>
:root {
  --bg: #0f172a;
  --surface: #1e293b;
  --border: #334155;
  --text: #e2e8f0;
  --text-muted: #94a3b8;
  --emerald: #10b981;
  --amber: #f59e0b;
  --red: #ef4444;
  --blue: #3b82f6;
  --slate: #64748b;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
  display: flex;
  min-height: 100vh;
}

/* Sidebar */
aside {
  width: 64px;
  background: var(--surface);
  border-right: 1px solid var(--border);
  display: flex;
  flex-direction: column;
  transition: width 0.2s;
}
aside.expanded { width: 220px; }
aside .brand {
  display: flex;
  align-items: center;
  gap: 10px;
  padding: 16px;
  border-bottom: 1px solid var(--border);
  font-weight: 700;
  color: var(--blue);
  font-family: var(--mono);
  white-space: nowrap;
  overflow: hidden;
}
aside nav { flex: 1; padding: 12px 8px; }
aside nav button, aside .toggle {
  display: flex;
  align-items: center;
  gap: 12px;
  width: 100%;
  background: none;
  border: none;
  color: var(--text-muted);
  padding: 10px 12px;
  border-radius: var(--radius);
  cursor: pointer;
  font-size: 14px;
  white-space: nowrap;
  overflow: hidden;
}
aside nav button:hover, aside .toggle:hover { background: var(--border); color: var(--text); }
aside nav button.active { background: rgba(59,130,246,0.15); color: var(--blue); }
aside .label { display: none; }
aside.expanded .label { display: inline; }
aside footer {
  padding: 12px 16px;
  border-top: 1px solid var(--border);
  color: var(--text-muted);
  font-size: 11px;
  white-space: nowrap;
  overflow: hidden;
}

/* Layout */
main { flex: 1; padding: 24px; overflow-x: hidden; }
header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }
header .meta { text-align: right; font-size: 13px; color: var(--text-muted); }
header .meta strong { color: var(--text); }

section { margin-bottom: 28px; }
section h2 { font-size: 16px; font-weight: 600; margin-bottom: 12px; }

/* KPI cards */
.cards {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 16px;
}
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
}
.card .title { color: var(--text-muted); font-size: 12px; text-transform: uppercase; letter-spacing: 0.5px; }
.card .value { font-size: 28px; font-weight: 700; margin: 4px 0; }
.card .sub { color: var(--text-muted); font-size: 13px; }

.bar { height: 6px; background: var(--border); border-radius: 3px; overflow: hidden; margin-top: 10px; }
.bar > div { height: 100%; border-radius: 3px; }

/* Module health matrix */
.matrix {
  position: relative;
  width: 100%;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  overflow: hidden;
}
.matrix .cell {
  position: absolute;
  border: 2px solid;
  padding: 8px;
  color: #fff;
  cursor: pointer;
  overflow: hidden;
}
.matrix .cell:hover { filter: brightness(1.15); }
.matrix .code { font-size: 18px; font-weight: 700; }
.matrix .systems { font-size: 12px; opacity: 0.9; }
.matrix .bar { background: rgba(255,255,255,0.3); max-width: 120px; }
.matrix .bar > div { background: #fff; }
.legend { display: flex; gap: 16px; margin-top: 10px; font-size: 12px; color: var(--text-muted); }
.legend span::before {
  content: '';
  display: inline-block;
  width: 10px;
  height: 10px;
  border-radius: 2px;
  margin-right: 6px;
  background: var(--swatch);
}

.tooltip {
  position: fixed;
  pointer-events: none;
  background: #0b1220;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px 12px;
  font-size: 12px;
  min-width: 200px;
  display: none;
  z-index: 10;
}
.tooltip .name { font-weight: 600; font-size: 14px; margin-bottom: 6px; }
.tooltip .row { display: flex; justify-content: space-between; gap: 12px; }
.tooltip .risk { color: var(--red); margin-top: 4px; }

/* Inventory */
.controls { display: flex; gap: 12px; margin-bottom: 12px; flex-wrap: wrap; }
.controls input, .controls select {
  background: var(--surface);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 8px 10px;
  font-size: 14px;
}
.controls input { flex: 1; min-width: 220px; }

table {
  width: 100%;
  border-collapse: collapse;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
}
th, td { padding: 10px 12px; text-align: left; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-size: 12px; font-weight: 500; text-transform: uppercase; }
th button {
  background: none;
  border: none;
  color: inherit;
  font: inherit;
  text-transform: inherit;
  cursor: pointer;
}
th button.active { color: var(--blue); }
td .region { color: var(--text-muted); font-size: 12px; }
td .progress { display: flex; align-items: center; gap: 8px; }
td .progress .bar { flex: 1; margin: 0; min-width: 80px; }
.badge {
  display: inline-block;
  padding: 2px 10px;
  border-radius: 12px;
  border: 1px solid;
  font-size: 11px;
  font-weight: 600;
}
.empty { text-align: center; color: var(--text-muted); padding: 32px; }
.count { color: var(--text-muted); font-size: 12px; margin-top: 8px; }
</style>
</head>
<body>

<aside id="sidebar">
  <div class="brand"><span>◆</span><span class="label" id="product"></span></div>
  <nav id="nav"></nav>
  <button class="toggle" id="toggle" title="Toggle sidebar"><span>☰</span><span class="label">Collapse</span></button>
  <footer class="label" id="footer"></footer>
</aside>

<main>
  <header>
    <div>
      <h1 id="title"></h1>
      <div class="subtitle" id="subtitle"></div>
    </div>
    <div class="meta">
      <div>Last Updated: <strong id="updated"></strong></div>
      <div id="user"></div>
    </div>
  </header>

  <section>
    <div class="cards" id="cards"></div>
  </section>

  <section>
    <h2>Module Health Matrix</h2>
    <div class="matrix" id="matrix"></div>
    <div class="legend" id="legend"></div>
  </section>

  <section>
    <h2>Legacy Systems Inventory</h2>
    <div class="controls">
      <input id="search" type="text" placeholder="Search by system name or owner...">
      <select id="status">
        <option value="all">All Statuses</option>
        <option value="on-track">On Track</option>
        <option value="warning">Warning</option>
        <option value="critical">Critical</option>
      </select>
      <select id="module"><option value="all">All Modules</option></select>
    </div>
    <table>
      <thead>
        <tr>
          <th><button data-sort="name">System</button></th>
          <th>Owner</th>
          <th>Module</th>
          <th><button data-sort="decommissionDate">Decommission</button></th>
          <th><button data-sort="progress">Progress</button></th>
          <th>Status</th>
          <th><button data-sort="issuesOpen">Issues</button></th>
        </tr>
      </thead>
      <tbody id="rows"></tbody>
    </table>
    <div class="count" id="count"></div>
  </section>
</main>

<div class="tooltip" id="tooltip"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
const ICONS = { dashboard: '▦', database: '⛁', alert: '⚠', chart: '▤', settings: '⚙' };
let sidebarCollapsed = true;
let matrixData = null;
let inventory = { search: '', status: 'all', module: 'all', sort: 'progress', dir: 'asc' };
let searchTimer = null;

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(path) {
  const res = await fetch(path);
  return res.json();
}

function tone(name) {
  return 'var(--' + name + ')';
}

function esc(s) {
  const d = document.createElement('div');
  d.textContent = s === undefined || s === null ? '' : String(s);
  return d.innerHTML;
}

function bar(width, color) {
  return '<div class="bar"><div style="width:' + width + '%;background:' + color + '"></div></div>';
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------
async function loadShell() {
  const shell = await api('/api/shell');
  document.getElementById('title').textContent = shell.title;
  document.getElementById('subtitle').textContent = shell.subtitle;
  document.getElementById('product').textContent = shell.product;
  document.getElementById('footer').textContent = shell.footer;
  document.getElementById('updated').textContent = shell.last_updated;
  document.getElementById('user').textContent = shell.user + ' · ' + shell.role;
  sidebarCollapsed = shell.sidebar.collapsed;

  document.getElementById('nav').innerHTML = shell.nav.map(item =>
    '<button class="' + (item.active ? 'active' : '') + '" title="' + esc(item.label) + '">' +
    '<span>' + (ICONS[item.icon] || '•') + '</span>' +
    '<span class="label">' + esc(item.label) + '</span></button>'
  ).join('');
  renderSidebar();
}

function renderSidebar() {
  document.getElementById('sidebar').classList.toggle('expanded', !sidebarCollapsed);
}

document.getElementById('toggle').addEventListener('click', () => {
  sidebarCollapsed = !sidebarCollapsed;
  renderSidebar();
  if (matrixData) renderMatrix();
});

// ---------------------------------------------------------------------------
// Executive summary
// ---------------------------------------------------------------------------
async function loadSummary() {
  const summary = await api('/api/summary');
  document.getElementById('cards').innerHTML = summary.cards.map(card =>
    '<div class="card">' +
    '<div class="title">' + esc(card.title) + '</div>' +
    '<div class="value" style="color:' + tone(card.tone) + '">' + esc(card.value) + '</div>' +
    '<div class="sub">' + esc(card.subtitle) + '</div>' +
    (card.bar ? bar(card.bar.width, tone(card.bar.tone)) : '') +
    '</div>'
  ).join('');
}

// ---------------------------------------------------------------------------
// Module health matrix
// ---------------------------------------------------------------------------
async function loadMatrix() {
  matrixData = await api('/api/modules');
  renderMatrix();
}

function renderMatrix() {
  const el = document.getElementById('matrix');
  const scale = el.clientWidth / matrixData.width;
  el.style.height = Math.round(matrixData.height * scale) + 'px';

  el.innerHTML = matrixData.cells.map((cell, i) => {
    const r = cell.rect;
    let inner = '';
    if (cell.overlay) {
      inner =
        '<div class="code">' + esc(cell.overlay.code) + '</div>' +
        '<div class="systems">' + esc(cell.overlay.systems) + '</div>' +
        '<div class="systems">' + cell.overlay.completion + '% complete</div>' +
        bar(cell.overlay.bar_width, '#fff');
    }
    return '<div class="cell" data-index="' + i + '" style="' +
      'left:' + r.x * scale + 'px;top:' + r.y * scale + 'px;' +
      'width:' + r.width * scale + 'px;height:' + r.height * scale + 'px;' +
      'background:' + cell.color + ';border-color:' + cell.color + '">' + inner + '</div>';
  }).join('');

  document.getElementById('legend').innerHTML = matrixData.legend.map(entry =>
    '<span style="--swatch:' + tone(entry.tone) + '">' + esc(entry.label) + '</span>'
  ).join('');
}

const tooltip = document.getElementById('tooltip');
document.getElementById('matrix').addEventListener('mousemove', e => {
  const target = e.target.closest('.cell');
  if (!target || !matrixData) { tooltip.style.display = 'none'; return; }
  const d = matrixData.cells[Number(target.dataset.index)].detail;
  tooltip.innerHTML =
    '<div class="name">' + esc(d.name) + '</div>' +
    '<div class="row"><span>Owner</span><span>' + esc(d.owner) + '</span></div>' +
    '<div class="row"><span>Systems</span><span>' + d.system_count + '</span></div>' +
    '<div class="row"><span>Completion</span><span>' + d.completion + '%</span></div>' +
    '<div class="row"><span>Budget</span><span>' + esc(d.budget) + '</span></div>' +
    '<div class="row"><span>Status</span><span style="color:' + tone(d.status_tone) + '">' +
    esc(d.status_label) + '</span></div>' +
    (d.critical_risks ? '<div class="risk">⚠ ' + d.critical_risks + ' Critical Risks</div>' : '');
  tooltip.style.display = 'block';
  tooltip.style.left = (e.clientX + 14) + 'px';
  tooltip.style.top = (e.clientY + 14) + 'px';
});
document.getElementById('matrix').addEventListener('mouseleave', () => {
  tooltip.style.display = 'none';
});
window.addEventListener('resize', () => { if (matrixData) renderMatrix(); });

// ---------------------------------------------------------------------------
// Systems inventory
// ---------------------------------------------------------------------------
async function loadSystems(toggle) {
  const params = new URLSearchParams(inventory);
  if (toggle) params.set('toggle', toggle);
  const data = await api('/api/systems?' + params.toString());

  inventory.search = data.state.search;
  inventory.status = data.state.status;
  inventory.module = data.state.module;
  inventory.sort = data.state.sort.key;
  inventory.dir = data.state.sort.direction;
  renderSystems(data);
}

function renderSystems(data) {
  const moduleSelect = document.getElementById('module');
  moduleSelect.innerHTML = '<option value="all">All Modules</option>' +
    data.module_options.map(opt =>
      '<option value="' + esc(opt.id) + '">' + esc(opt.label) + '</option>'
    ).join('');
  moduleSelect.value = data.state.module;
  document.getElementById('status').value = data.state.status;

  document.querySelectorAll('th button').forEach(b => {
    const active = b.dataset.sort === data.state.sort.key;
    b.classList.toggle('active', active);
    b.dataset.arrow = active ? (data.state.sort.direction === 'asc' ? ' ↑' : ' ↓') : '';
    b.textContent = b.textContent.replace(/ [↑↓]$/, '') + b.dataset.arrow;
  });

  const body = document.getElementById('rows');
  if (data.empty_message) {
    body.innerHTML = '<tr><td colspan="7" class="empty">' + esc(data.empty_message) + '</td></tr>';
  } else {
    body.innerHTML = data.rows.map(row =>
      '<tr>' +
      '<td><div>' + esc(row.name) + '</div><div class="region">' + esc(row.region) + '</div></td>' +
      '<td>' + esc(row.owner) + '</td>' +
      '<td>' + esc(row.module) + '</td>' +
      '<td>' + esc(row.decommission_date) + '</td>' +
      '<td><div class="progress">' + bar(row.progress.width, tone(row.progress.tone)) +
      '<span>' + row.progress.value + '%</span></div></td>' +
      '<td><span class="badge" style="color:' + row.status.text_color +
      ';background:' + row.status.background + ';border-color:' + row.status.border + '">' +
      esc(row.status.text) + '</span></td>' +
      '<td style="color:' + tone(row.issues.tone) + ';font-weight:600">' + row.issues.count + '</td>' +
      '</tr>'
    ).join('');
  }
  document.getElementById('count').textContent = data.count_label;
}

document.getElementById('search').addEventListener('input', e => {
  inventory.search = e.target.value;
  clearTimeout(searchTimer);
  searchTimer = setTimeout(() => loadSystems(), 150);
});
document.getElementById('status').addEventListener('change', e => {
  inventory.status = e.target.value;
  loadSystems();
});
document.getElementById('module').addEventListener('change', e => {
  inventory.module = e.target.value;
  loadSystems();
});
document.querySelectorAll('th button').forEach(b => {
  b.addEventListener('click', () => loadSystems(b.dataset.sort));
});

// ---------------------------------------------------------------------------
// Boot
// ---------------------------------------------------------------------------
loadShell();
loadSummary();
loadMatrix();
loadSystems();
</script>
</body>
</html>
"##;
