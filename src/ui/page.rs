//! The single-page upload UI served at `/`.
//!
//! The script mirrors [`super::session::UploadSession`]: one `phase` value
//! drives which panel is visible, and the result text goes through the same
//! escape-then-substitute rules as [`super::markdown::render`].

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Gemini Image Analyzer</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: linear-gradient(135deg, #eff6ff 0%, #ffffff 50%, #faf5ff 100%);
            min-height: 100vh;
            padding: 48px 16px;
            color: #374151;
        }

        header { text-align: center; margin-bottom: 48px; }
        h1 {
            font-size: 3em;
            background: linear-gradient(90deg, #2563eb, #9333ea);
            -webkit-background-clip: text;
            background-clip: text;
            color: transparent;
            margin-bottom: 16px;
        }
        .subtitle { color: #4b5563; font-size: 1.2em; max-width: 640px; margin: 0 auto; }

        .card {
            background: white;
            border-radius: 20px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.1);
            border: 1px solid #f3f4f6;
            padding: 32px;
            margin: 0 auto;
        }
        .card.narrow { max-width: 480px; text-align: center; }
        .card.wide { max-width: 900px; }
        .card h2 { font-size: 1.8em; margin-bottom: 8px; text-align: center; }
        .card .hint { color: #6b7280; text-align: center; margin-bottom: 24px; }

        button {
            border: 0;
            border-radius: 8px;
            padding: 12px 24px;
            font-size: 1em;
            font-weight: 600;
            cursor: pointer;
        }
        button:disabled { opacity: 0.5; cursor: default; }
        .primary { background: linear-gradient(90deg, #2563eb, #9333ea); color: white; width: 100%; }
        .go { background: linear-gradient(90deg, #16a34a, #2563eb); color: white; }
        .secondary { background: #e5e7eb; color: #111827; }
        .outline { background: transparent; border: 1px solid #d1d5db; color: #111827; }

        .upload-area {
            border: 2px dashed #d1d5db;
            border-radius: 12px;
            padding: 32px;
            text-align: center;
            cursor: pointer;
            transition: all 0.2s;
        }
        .upload-area:hover { border-color: #9ca3af; }
        .upload-area.dragover { border-color: #60a5fa; background: #eff6ff; }
        .upload-icon { font-size: 2.5em; color: #9ca3af; }
        input[type="file"] { display: none; }
        .preview-image { max-height: 256px; max-width: 100%; border-radius: 8px; box-shadow: 0 4px 15px rgba(0,0,0,0.1); }
        .file-meta { font-size: 0.9em; color: #4b5563; margin: 12px 0; }

        .actions { margin-top: 32px; display: flex; justify-content: center; gap: 16px; }

        .spinner {
            display: inline-block;
            width: 18px;
            height: 18px;
            border: 2px solid white;
            border-top-color: transparent;
            border-radius: 50%;
            animation: spin 1s linear infinite;
            vertical-align: middle;
            margin-right: 8px;
        }
        @keyframes spin { to { transform: rotate(360deg); } }

        .result {
            margin-top: 32px;
            background: linear-gradient(90deg, #eff6ff, #faf5ff);
            border: 1px solid #dbeafe;
            border-radius: 16px;
            padding: 32px;
        }
        .result h3 { font-size: 1.5em; margin-bottom: 24px; }
        .result-text { line-height: 1.7; font-size: 1.05em; }
        .result-text p { margin-bottom: 16px; }
        .result-text strong { color: #111827; }
        .result-text em { color: #1d4ed8; }

        .hidden { display: none !important; }
    </style>
</head>
<body>
    <header>
        <h1>Gemini Image Analyzer</h1>
        <p class="subtitle">Unlock the power of AI to understand your images with detailed, intelligent analysis</p>
    </header>

    <section class="card narrow" id="landing">
        <div class="upload-icon">📸</div>
        <h2>Ready to Analyze?</h2>
        <p class="hint">Upload any image and let Google's Gemini AI describe what it sees</p>
        <button class="primary" id="startButton">Get Started</button>
    </section>

    <section class="card wide hidden" id="uploader">
        <h2>Upload Your Image</h2>
        <p class="hint">Drop your image below or click to browse</p>

        <div class="upload-area" id="uploadArea">
            <input type="file" id="fileInput" accept="image/*">
            <div id="emptyState">
                <div class="upload-icon">📁</div>
                <p><strong>Drop an image here or click to upload</strong></p>
                <p class="file-meta">Supports JPG, PNG, GIF up to 10MB</p>
            </div>
            <div id="previewState" class="hidden">
                <img id="previewImage" class="preview-image" alt="Preview">
                <p class="file-meta" id="fileMeta"></p>
                <button class="outline" id="removeButton">Remove Image</button>
            </div>
        </div>

        <div class="actions hidden" id="analyzeActions">
            <button class="go" id="analyzeButton">🔍 Analyze Image</button>
        </div>

        <div class="result hidden" id="result">
            <h3>✨ AI Analysis Results</h3>
            <div class="result-text" id="resultText"></div>
        </div>

        <div class="actions">
            <button class="secondary hidden" id="anotherButton">🔄 Analyze Another</button>
            <button class="outline" id="backButton">← Back to Home</button>
        </div>
    </section>

    <script>
        // phase: 'landing' | 'empty' | 'selected' | 'analyzing' | 'result'
        let state = { phase: 'landing', file: null, preview: null, analysis: null };

        const $ = (id) => document.getElementById(id);
        const uploadArea = $('uploadArea');
        const fileInput = $('fileInput');

        function escapeHtml(text) {
            return text
                .replace(/&/g, '&amp;')
                .replace(/</g, '&lt;')
                .replace(/>/g, '&gt;')
                .replace(/"/g, '&quot;')
                .replace(/'/g, '&#39;');
        }

        function renderAnalysis(text) {
            const html = escapeHtml(text.replace(/\r\n/g, '\n'))
                .replace(/\*\*(.*?)\*\*/g, '<strong>$1</strong>')
                .replace(/\*(.*?)\*/g, '<em>$1</em>')
                .replace(/\n\n/g, '</p><p>')
                .replace(/\n/g, '<br>');
            return '<p>' + html + '</p>';
        }

        function setState(next) {
            state = Object.assign({}, state, next);
            render();
        }

        function render() {
            const { phase, file, preview, analysis } = state;
            const hasFile = file !== null;

            $('landing').classList.toggle('hidden', phase !== 'landing');
            $('uploader').classList.toggle('hidden', phase === 'landing');

            $('emptyState').classList.toggle('hidden', hasFile);
            $('previewState').classList.toggle('hidden', !hasFile);
            if (hasFile) {
                $('previewImage').src = preview || '';
                $('fileMeta').textContent = file.name + ' (' + Math.round(file.size / 1024) + 'KB)';
            }

            const busy = phase === 'analyzing';
            $('analyzeActions').classList.toggle('hidden', !(phase === 'selected' || busy));
            $('analyzeButton').disabled = busy;
            $('analyzeButton').innerHTML = busy
                ? '<span class="spinner"></span>Analyzing...'
                : '🔍 Analyze Image';
            $('removeButton').classList.toggle('hidden', phase !== 'selected');

            $('result').classList.toggle('hidden', phase !== 'result');
            $('resultText').innerHTML = phase === 'result' ? renderAnalysis(analysis) : '';
            $('anotherButton').classList.toggle('hidden', phase !== 'result');
        }

        function selectFile(file) {
            if (!file || !file.type.startsWith('image/')) return;
            if (state.phase !== 'empty' && state.phase !== 'selected') return;

            const reader = new FileReader();
            reader.onload = (e) => {
                if (state.file === file) setState({ preview: e.target.result });
            };
            reader.readAsDataURL(file);
            setState({ phase: 'selected', file, preview: null, analysis: null });
        }

        async function analyze() {
            if (state.phase !== 'selected') return;
            setState({ phase: 'analyzing' });

            const formData = new FormData();
            formData.append('image', state.file);

            let outcome;
            try {
                const response = await fetch('/api/analyze', { method: 'POST', body: formData });
                const data = await response.json();
                outcome = response.ok ? { analysis: data.analysis } : { error: 'Error: ' + data.error };
            } catch (error) {
                outcome = { error: 'Failed to analyze image' };
            }

            if (state.phase !== 'analyzing') return;
            if (outcome.error) {
                setState({ phase: 'selected' });
                alert(outcome.error);
            } else {
                setState({ phase: 'result', analysis: outcome.analysis });
            }
        }

        $('startButton').addEventListener('click', () => {
            if (state.phase === 'landing') setState({ phase: 'empty' });
        });

        uploadArea.addEventListener('click', () => fileInput.click());
        uploadArea.addEventListener('dragover', (e) => {
            e.preventDefault();
            uploadArea.classList.add('dragover');
        });
        uploadArea.addEventListener('dragleave', (e) => {
            e.preventDefault();
            uploadArea.classList.remove('dragover');
        });
        uploadArea.addEventListener('drop', (e) => {
            e.preventDefault();
            uploadArea.classList.remove('dragover');
            selectFile(e.dataTransfer.files[0]);
        });
        fileInput.addEventListener('change', (e) => {
            selectFile(e.target.files[0]);
            fileInput.value = '';
        });

        $('removeButton').addEventListener('click', (e) => {
            e.stopPropagation();
            if (state.phase === 'selected') setState({ phase: 'empty', file: null, preview: null });
        });
        $('analyzeButton').addEventListener('click', analyze);
        $('anotherButton').addEventListener('click', () => {
            setState({ phase: 'empty', file: null, preview: null, analysis: null });
        });
        $('backButton').addEventListener('click', () => {
            setState({ phase: 'landing', file: null, preview: null, analysis: null });
        });

        render();
    </script>
</body>
</html>
"#;
